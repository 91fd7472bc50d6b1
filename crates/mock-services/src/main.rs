//! Mock Services CLI
//!
//! 模拟奖励平台的命令行入口点。

use clap::Parser;
use rally_mock::cli::{Cli, CommandRunner, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 优先使用环境变量 RUST_LOG，否则使用命令行参数指定的级别
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .init();

    let runner = CommandRunner::new();

    match cli.command {
        Commands::Server { port, token } => runner.run_server(port, token).await?,
        Commands::Routes => runner.run_routes(),
    }

    Ok(())
}
