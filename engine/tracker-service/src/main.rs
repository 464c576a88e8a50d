//! Club Tracker
//!
//! Reads each club's weekly score sheets, computes player and team
//! statistics and writes the reports.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use tracker_service::{initialize_logging, load_config, Cli, CliHandler};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configuration decides the log level, so it is loaded first
    let config = load_config(cli.config.as_deref(), cli.data_dir.as_deref())
        .context("Failed to load configuration")?;
    initialize_logging(&config.logging)?;

    info!("Starting Club Tracker v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {:?}", config.data.data_dir);

    let handler = CliHandler::new(config);
    handler.handle_command(cli.command).await
}
