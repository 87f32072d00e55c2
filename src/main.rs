//! # Main Entry Point
//!
//! Loads `config.yaml`, installs logging, then runs the requested command.

use anyhow::Result;
use clap::Parser;

use courier::domain::config::AppConfig;
use courier::infrastructure::logging;
use courier::interface::cli::{self, Cli, Command};
use courier::strings::logs;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // 1. Load Configuration
    let config = AppConfig::load(&args.config)?;

    // 2. Logging Setup
    let _guard = logging::init(&config.logging)?;
    tracing::info!("{}", logs::STARTING);
    tracing::debug!(
        "{}",
        logs::config_loaded(&args.config.display().to_string(), config.destinations.len())
    );

    // 3. Run
    match args.command {
        Command::Send {
            to,
            username,
            message,
        } => {
            let message = cli::build_message(&config, &to, username, message)?;
            cli::send(&config, &to, &message).await
        }
        Command::Check => cli::check(&config),
    }
}
