//! # Rate-Limit Signals
//!
//! The two-way classification applied to every failed send: rate-limited
//! (optionally with a server-suggested wait) or not.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Classification of a single failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSignal {
    pub is_rate_limited: bool,
    /// Server-suggested wait. Only meaningful when `is_rate_limited`.
    pub retry_after: Option<Duration>,
}

impl RateLimitSignal {
    /// Any failure that is not a throttle.
    pub const fn other() -> Self {
        Self {
            is_rate_limited: false,
            retry_after: None,
        }
    }

    pub const fn rate_limited(retry_after: Option<Duration>) -> Self {
        Self {
            is_rate_limited: true,
            retry_after,
        }
    }

    /// Rate-limited with a wait given in (possibly fractional) seconds.
    /// Negative or non-finite values are treated as absent.
    pub fn from_retry_after_secs(secs: f64) -> Self {
        Self::rate_limited(Duration::try_from_secs_f64(secs).ok())
    }
}

/// Decides whether an error of type `E` is a rate limit.
pub trait RateLimitClassifier<E: ?Sized> {
    fn classify(&self, error: &E) -> RateLimitSignal;
}

impl<E: ?Sized, F> RateLimitClassifier<E> for F
where
    F: Fn(&E) -> RateLimitSignal,
{
    fn classify(&self, error: &E) -> RateLimitSignal {
        self(error)
    }
}

/// Parse a `Retry-After` value: delta-seconds (fractional allowed) or an HTTP-date.
///
/// Dates already in the past yield a zero wait. Unparseable input yields `None`
/// so the policy default applies.
pub fn parse_retry_after(raw: &str, now: DateTime<Utc>) -> Option<Duration> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(secs) = raw.parse::<f64>() {
        return Duration::try_from_secs_f64(secs).ok();
    }

    let at = DateTime::parse_from_rfc2822(raw).ok()?.with_timezone(&Utc);
    Some((at - now).to_std().unwrap_or(Duration::ZERO))
}
