//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Defines the structs for retry settings, destinations, HTTP and logging.

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::policy::{RetryConfig, RetryPolicy};

pub const DEFAULT_CONFIG_PATH: &str = "data/config.yaml";

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub destinations: BTreeMap<String, DestinationConfig>,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// A named webhook target.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DestinationConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_env: Option<String>, // e.g. "OPS_WEBHOOK_URL"
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: default_log_file(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
fn default_log_file() -> Option<String> {
    Some("data/session.log".to_string())
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn retry_policy(&self) -> Result<RetryPolicy> {
        RetryPolicy::try_from(self.retry.clone()).context("Invalid retry settings")
    }

    pub fn destination(&self, name: &str) -> Result<&DestinationConfig> {
        self.destinations
            .get(name)
            .ok_or_else(|| anyhow!("Unknown destination '{name}'"))
    }
}

impl DestinationConfig {
    /// Resolve the webhook URL, preferring the inline value over `url_env`.
    pub fn resolve_url(&self) -> Result<String> {
        if let Some(url) = self.url.as_ref().filter(|u| !u.is_empty()) {
            return Ok(url.clone());
        }
        match &self.url_env {
            Some(var) => std::env::var(var)
                .with_context(|| format!("Environment variable {var} is not set")),
            None => Err(anyhow!("Destination has neither `url` nor `url_env`")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    const SAMPLE: &str = r#"
retry:
  max_attempts: 5
  min_backoff_seconds: 0.5
destinations:
  ops:
    url: https://chat.example.com/hooks/abc
    username: deploy-bot
  alerts:
    url_env: COURIER_TEST_ALERTS_URL
logging:
  level: debug
  file: null
"#;

    #[test]
    fn test_parse_sample() {
        let config = AppConfig::from_yaml(SAMPLE).unwrap();
        let policy = config.retry_policy().unwrap();
        assert_eq!(policy.max_attempts(), 5);
        assert_eq!(policy.min_backoff(), Duration::from_millis(500));
        // Unspecified field keeps its default
        assert_eq!(policy.default_backoff(), Duration::from_secs(2));

        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, None);

        let ops = config.destination("ops").unwrap();
        assert_eq!(ops.username.as_deref(), Some("deploy-bot"));
        assert_eq!(
            ops.resolve_url().unwrap(),
            "https://chat.example.com/hooks/abc"
        );
        assert!(config.destination("nowhere").is_err());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_yaml("{}").unwrap();
        assert_eq!(config.retry_policy().unwrap(), RetryPolicy::default());
        assert_eq!(config.logging.file.as_deref(), Some("data/session.log"));
        assert!(config.destinations.is_empty());
    }

    #[test]
    fn test_invalid_policy_is_reported() {
        let config = AppConfig::from_yaml("retry:\n  max_attempts: 0\n").unwrap();
        assert!(config.retry_policy().is_err());
    }

    #[test]
    fn test_missing_url() {
        let dest = DestinationConfig {
            url: None,
            url_env: None,
            username: None,
        };
        assert!(dest.resolve_url().is_err());

        let dest = DestinationConfig {
            url: None,
            url_env: Some("COURIER_TEST_SURELY_UNSET_VAR".into()),
            username: None,
        };
        assert!(dest.resolve_url().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.destinations.len(), 2);

        assert!(AppConfig::load("/definitely/not/here.yaml").is_err());
    }
}
