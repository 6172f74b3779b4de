//! Homework Watch CLI
//!
//! Command-line interface for the homework review status watcher.

use std::path::PathBuf;

use clap::Parser;
use homework_watch::{load_config, logging, Config, Credentials, WatcherBuilder};
use tracing::Level;

#[derive(Parser)]
#[command(name = "homework-watch")]
#[command(about = "Watches homework review statuses and reports changes via Telegram")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Polling interval in seconds (overrides config file)
    #[arg(long)]
    interval: Option<u64>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = if let Some(config_path) = &args.config {
        load_config(config_path)?
    } else {
        Config::default()
    };

    if let Some(interval) = args.interval {
        config.polling_interval_seconds = interval;
    }

    let _log_guard = logging::init(&config.logging, args.log_level)?;

    tracing::debug!(
        "Parsed command line arguments: config={:?}, interval={:?}, log_level={:?}",
        args.config,
        args.interval,
        args.log_level
    );

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            tracing::error!("Cannot start: {}", e);
            return Err(e.into());
        }
    };

    tracing::info!("Starting homework watcher");
    tracing::debug!("Endpoint: {}", config.endpoint);

    let watcher = WatcherBuilder::new(config, credentials).build()?;

    let cancel = watcher.cancellation_token();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Shutdown signal received");
                cancel.cancel();
            }
            Err(e) => tracing::error!("Failed to listen for ctrl-c: {}", e),
        }
    });

    watcher.start().await?;

    Ok(())
}
