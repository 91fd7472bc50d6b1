//! CLI 模块
//!
//! # 使用示例
//!
//! ```bash
//! # 运行基础流程
//! rally-flow run
//!
//! # 运行全部步骤，但不创建虚拟货币
//! rally-flow run --variant full --without create-virtual-money
//!
//! # 分两次调用，通过注解文件传递标识
//! rally-flow run --only create-project --only create-application --annotations ids.jsonl
//! rally-flow run --only create-game-action --annotations ids.jsonl
//!
//! # 查看步骤及其输入输出
//! rally-flow stages
//! ```

pub mod commands;
pub mod runner;

pub use commands::{Cli, Commands, RunArgs};
pub use runner::CommandRunner;
