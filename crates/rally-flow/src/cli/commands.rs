//! CLI 命令定义

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::{DEFAULT_TRIGGER_POINTS, FlowVariant};
use crate::stage::Stage;

/// 奖励平台 API 流程运行工具
#[derive(Parser, Debug)]
#[command(name = "rally-flow")]
#[command(version, about = "按顺序调用奖励平台 API 并校验响应结构")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)，覆盖配置文件
    #[arg(short, long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 运行流程
    Run(RunArgs),

    /// 列出全部步骤及其输入输出
    Stages,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// 流程变体 (basic, full)
    #[arg(short, long, default_value = "basic")]
    pub variant: FlowVariant,

    /// 只运行指定步骤（可重复），忽略 --variant
    #[arg(long = "only")]
    pub only: Vec<Stage>,

    /// 关闭指定步骤（可重复）
    #[arg(long = "without")]
    pub without: Vec<Stage>,

    /// 触发游戏动作时提交的积分
    #[arg(short, long, default_value = DEFAULT_TRIGGER_POINTS)]
    pub points: String,

    /// 注解历史文件（JSON Lines），用于在多次调用之间传递标识
    #[arg(short, long)]
    pub annotations: Option<PathBuf>,

    /// 额外输出 JSON 格式的报告
    #[arg(long)]
    pub json: bool,
}
