//! # Command Line Interface
//!
//! `courier send` delivers one message; `courier check` validates the config.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::application::dispatch::Dispatcher;
use crate::domain::config::{AppConfig, DEFAULT_CONFIG_PATH};
use crate::domain::types::OutgoingMessage;
use crate::infrastructure::webhook::WebhookSink;
use crate::strings::{logs, messages};

#[derive(Debug, Parser)]
#[command(name = "courier", version, about = "Deliver chat messages with rate-limit-aware retries")]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, short, env = "COURIER_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send a single message to a configured destination
    Send {
        /// Destination name from the `destinations:` section
        #[arg(long)]
        to: String,
        /// Override the display name configured for the destination
        #[arg(long)]
        username: Option<String>,
        /// Message content
        message: String,
    },
    /// Validate the configuration and print the effective retry policy
    Check,
}

/// Build the outgoing message for `send`, applying the destination's default username.
pub fn build_message(
    config: &AppConfig,
    to: &str,
    username: Option<String>,
    content: String,
) -> Result<OutgoingMessage> {
    let destination = config.destination(to)?;
    let mut message = OutgoingMessage::new(content);
    if let Some(name) = username.or_else(|| destination.username.clone()) {
        message = message.with_username(name);
    }
    Ok(message)
}

pub async fn send(config: &AppConfig, to: &str, message: &OutgoingMessage) -> Result<()> {
    let url = config.destination(to)?.resolve_url()?;
    let sink = WebhookSink::new(to, url, Duration::from_secs(config.http.timeout_secs))?;
    let dispatcher = Dispatcher::new(Arc::new(sink), config.retry_policy()?);

    tokio::select! {
        result = dispatcher.deliver(message) => match result {
            Ok(receipt) => {
                println!("{}", messages::delivered(to, &receipt));
                Ok(())
            }
            Err(e) => {
                eprintln!("{}", messages::describe_failure(&e));
                Err(e).context(format!("Delivery to '{to}' failed"))
            }
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("{}", logs::CANCELLED);
            anyhow::bail!("Delivery to '{to}' interrupted")
        }
    }
}

pub fn check(config: &AppConfig) -> Result<()> {
    let policy = config.retry_policy()?;
    println!(
        "retry: max_attempts={} min_backoff={:.2}s default_backoff={:.2}s",
        policy.max_attempts(),
        policy.min_backoff().as_secs_f64(),
        policy.default_backoff().as_secs_f64()
    );
    for (name, destination) in &config.destinations {
        let state = match destination.resolve_url() {
            Ok(_) => "ok".to_string(),
            Err(e) => format!("unresolved ({e})"),
        };
        println!("destination {name}: {state}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_send() {
        let cli = Cli::try_parse_from([
            "courier", "--config", "x.yaml", "send", "--to", "ops", "build green",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("x.yaml"));
        match cli.command {
            Command::Send {
                to,
                username,
                message,
            } => {
                assert_eq!(to, "ops");
                assert_eq!(username, None);
                assert_eq!(message, "build green");
            }
            Command::Check => panic!("expected send"),
        }
    }

    #[test]
    fn test_build_message_username_precedence() {
        let config = AppConfig::from_yaml(
            "destinations:\n  ops:\n    url: http://localhost/hook\n    username: deploy-bot\n",
        )
        .unwrap();

        let msg = build_message(&config, "ops", None, "hi".into()).unwrap();
        assert_eq!(msg.username.as_deref(), Some("deploy-bot"));

        let msg = build_message(&config, "ops", Some("me".into()), "hi".into()).unwrap();
        assert_eq!(msg.username.as_deref(), Some("me"));

        assert!(build_message(&config, "nope", None, "hi".into()).is_err());
    }
}
