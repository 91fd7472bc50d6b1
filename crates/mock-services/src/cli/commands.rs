//! CLI 命令定义
//!
//! 使用 clap derive 宏定义命令行接口结构。

use clap::{Parser, Subcommand};

/// Mock 奖励平台命令行工具
#[derive(Parser, Debug)]
#[command(name = "mock-server")]
#[command(version, about = "奖励平台模拟服务工具")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 启动 Mock 服务（HTTP REST API）
    Server {
        /// 服务端口
        #[arg(short, long, default_value = "8090")]
        port: u16,

        /// 要求的 Bearer Token；不提供则不校验认证头
        #[arg(short, long)]
        token: Option<String>,
    },

    /// 列出模拟的端点
    Routes,
}
