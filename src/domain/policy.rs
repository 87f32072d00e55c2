//! # Retry Policy
//!
//! Immutable settings that bound how long a rate-limited send keeps trying.
//! Built from the `retry:` section of `config.yaml` and validated once.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use super::signal::RateLimitSignal;

/// Raw retry settings as they appear in `config.yaml`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default)]
    pub min_backoff_seconds: f64,
    #[serde(default = "default_backoff_seconds")]
    pub default_backoff_seconds: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            min_backoff_seconds: 0.0,
            default_backoff_seconds: default_backoff_seconds(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}
fn default_backoff_seconds() -> f64 {
    2.0
}

#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    #[error("max_attempts must be at least 1")]
    NoAttempts,
    #[error("{field} must be a finite, non-negative number of seconds (got {value})")]
    InvalidSeconds { field: &'static str, value: f64 },
}

/// Validated retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    min_backoff: Duration,
    default_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(
        max_attempts: u32,
        min_backoff_seconds: f64,
        default_backoff_seconds: f64,
    ) -> Result<Self, PolicyError> {
        if max_attempts == 0 {
            return Err(PolicyError::NoAttempts);
        }
        Ok(Self {
            max_attempts,
            min_backoff: seconds("min_backoff_seconds", min_backoff_seconds)?,
            default_backoff: seconds("default_backoff_seconds", default_backoff_seconds)?,
        })
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn min_backoff(&self) -> Duration {
        self.min_backoff
    }

    pub fn default_backoff(&self) -> Duration {
        self.default_backoff
    }

    /// Wait inserted before the next attempt:
    /// `max(retry_after or default_backoff, min_backoff)`.
    pub fn backoff_for(&self, signal: &RateLimitSignal) -> Duration {
        signal
            .retry_after
            .unwrap_or(self.default_backoff)
            .max(self.min_backoff)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            min_backoff: Duration::ZERO,
            default_backoff: Duration::from_secs(2),
        }
    }
}

impl TryFrom<RetryConfig> for RetryPolicy {
    type Error = PolicyError;

    fn try_from(config: RetryConfig) -> Result<Self, Self::Error> {
        Self::new(
            config.max_attempts,
            config.min_backoff_seconds,
            config.default_backoff_seconds,
        )
    }
}

fn seconds(field: &'static str, value: f64) -> Result<Duration, PolicyError> {
    Duration::try_from_secs_f64(value).map_err(|_| PolicyError::InvalidSeconds { field, value })
}
