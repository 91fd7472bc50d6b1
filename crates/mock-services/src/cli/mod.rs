//! CLI 模块
//!
//! # 使用示例
//!
//! ```bash
//! # 启动服务器，要求请求携带 Bearer Token
//! mock-server server --port 8090 --token local-token
//!
//! # 列出可用端点
//! mock-server routes
//! ```

pub mod commands;
pub mod runner;

pub use commands::{Cli, Commands};
pub use runner::CommandRunner;
