//! rally-flow 命令行入口

use clap::Parser;
use rally_flow::cli::{Cli, CommandRunner, Commands};
use rally_shared::config::RallyConfig;
use rally_shared::observability;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = RallyConfig::load()?;
    if let Some(level) = &cli.log_level {
        config.observability.log_level = level.clone();
    }
    observability::init(&config.observability);

    let runner = CommandRunner::new(config);

    match &cli.command {
        Commands::Run(args) => runner.run_flow(args).await?,
        Commands::Stages => runner.run_stages(),
    }

    Ok(())
}
