//! # Messages
//!
//! User-facing text for delivery outcomes.

use crate::application::invoker::InvokeError;
use crate::domain::types::{Receipt, SendError};

pub const NO_PERMISSION: &str = "❌ I don't have permission to post to this destination!";
pub const NOT_FOUND: &str = "❌ The destination was not found!";
pub const RATE_LIMITED: &str = "❌ I'm being rate limited! Please try again later.";
pub const UNEXPECTED: &str = "❌ An unexpected error occurred!";

pub fn api_error(status: u16, body: &str) -> String {
    if body.trim().is_empty() {
        format!("❌ API error: HTTP {status}")
    } else {
        format!("❌ API error (HTTP {status}): {}", body.trim())
    }
}

pub fn invalid_message(reason: &str) -> String {
    format!("❌ Invalid message: {reason}")
}

pub fn delivered(destination: &str, receipt: &Receipt) -> String {
    match &receipt.id {
        Some(id) => format!("✅ Delivered to {destination} (message {id})"),
        None => format!("✅ Delivered to {destination}"),
    }
}

/// Translate a failed delivery into something a person can act on.
pub fn describe_failure(error: &InvokeError<SendError>) -> String {
    match error {
        InvokeError::RetryBudgetExhausted { .. } => RATE_LIMITED.to_string(),
        InvokeError::NonRetryable(SendError::Http { status, body, .. }) => match status {
            403 => NO_PERMISSION.to_string(),
            404 => NOT_FOUND.to_string(),
            429 => RATE_LIMITED.to_string(),
            _ => api_error(*status, body),
        },
        InvokeError::NonRetryable(SendError::InvalidMessage(reason)) => invalid_message(reason),
        InvokeError::NonRetryable(SendError::Transport(_)) => UNEXPECTED.to_string(),
    }
}
