use clap::Parser;

use median::cli::{Cli, ConfigurationMerger, execute_command};
use median::logger::init_logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let merger = ConfigurationMerger::from_cli(&cli)?;
    let settings = merger.merge_cli_args(&cli)?;

    init_logger(settings.logger.clone().into_logger_config()?)?;
    tracing::debug!(version = median::pkg_version(), "Logger initialized");

    execute_command(&cli, settings, merger.environment()).await
}
