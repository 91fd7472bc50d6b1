//! 奖励平台 API 流程编排
//!
//! 把“创建项目 → 创建应用 → … → 触发游戏动作”组织成一条有序流水线：
//!
//! - `stage`: 各步骤及其声明的输入/输出
//! - `context`: 单次运行内共享的标识（进程内传递）
//! - `annotations`: 带标签的标识历史（跨文件/跨进程传递）
//! - `pipeline`: 可按步骤开关的参数化流水线与静态依赖检查
//! - `steps` / `expectations`: 每个步骤的调用与响应结构断言
//! - `report`: 运行结果汇总
//! - `suffix`: 每次运行生成唯一资源名称的后缀

pub mod annotations;
pub mod cli;
pub mod context;
pub mod expectations;
pub mod pipeline;
pub mod report;
pub mod stage;
pub mod steps;
pub mod suffix;

pub use annotations::{Annotation, AnnotationLog};
pub use context::{FlowContext, FlowKey};
pub use pipeline::{FlowSettings, FlowVariant, MissingInput, Pipeline, PipelineBuilder};
pub use report::{FlowReport, StepResult};
pub use stage::Stage;
