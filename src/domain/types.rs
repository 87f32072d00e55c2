//! # Domain Types
//!
//! Common data structures passed between the dispatcher and message sinks.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use super::signal::RateLimitSignal;

/// A single message bound for a single destination.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OutgoingMessage {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl OutgoingMessage {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            username: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

/// Acknowledgement returned by a sink after a successful send.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Receipt {
    pub status: u16,
    /// Platform message ID, when the platform returns one.
    pub id: Option<String>,
}

/// Failure reported by a message sink.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SendError {
    #[error("HTTP {status}: {body}")]
    Http {
        status: u16,
        retry_after: Option<Duration>,
        body: String,
    },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}

impl SendError {
    pub fn status(&self) -> Option<u16> {
        match self {
            SendError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Stock classifier: HTTP 429 is a rate limit, everything else is not.
    pub fn signal(&self) -> RateLimitSignal {
        match self {
            SendError::Http {
                status: 429,
                retry_after,
                ..
            } => RateLimitSignal::rate_limited(*retry_after),
            _ => RateLimitSignal::other(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_429_is_rate_limited() {
        let throttled = SendError::Http {
            status: 429,
            retry_after: Some(Duration::from_secs(1)),
            body: String::new(),
        };
        assert_eq!(
            throttled.signal(),
            RateLimitSignal::rate_limited(Some(Duration::from_secs(1)))
        );

        let forbidden = SendError::Http {
            status: 403,
            retry_after: Some(Duration::from_secs(1)),
            body: "Missing Permissions".into(),
        };
        assert_eq!(forbidden.signal(), RateLimitSignal::other());
        assert_eq!(
            SendError::Transport("connection reset".into()).signal(),
            RateLimitSignal::other()
        );
    }

    #[test]
    fn test_message_serializes_without_empty_username() {
        let json = serde_json::to_value(OutgoingMessage::new("hi")).unwrap();
        assert_eq!(json, serde_json::json!({ "content": "hi" }));

        let json = serde_json::to_value(OutgoingMessage::new("hi").with_username("ops")).unwrap();
        assert_eq!(json, serde_json::json!({ "content": "hi", "username": "ops" }));
    }
}
