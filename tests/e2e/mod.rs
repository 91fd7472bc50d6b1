//! 奖励平台 API 流程端到端测试
//!
//! 默认针对进程内启动的 Mock 平台运行，覆盖：
//! - 基础流程（项目 → 应用 → 游戏动作 → 用户 → 触发）
//! - 完整奖励目录流程
//! - 通过注解历史跨文件传递标识
//! - 前置条件失败与级联
//! - 缺少 token 时跳过
//! - 项目 upsert 幂等
//!
//! `suites::live` 针对真实平台，默认忽略，需要 BASE_URL / CLIENT_ID / BEARER_PROJECT_TOKEN。

pub mod setup;
pub mod suites;

pub use setup::TestEnvironment;
