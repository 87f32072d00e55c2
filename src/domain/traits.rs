//! # Domain Traits
//!
//! Abstract interfaces for outbound chat delivery.
//! Allows for pluggable implementations in the Infrastructure layer.

use async_trait::async_trait;

use super::types::{OutgoingMessage, Receipt, SendError};

/// Abstract interface for anything that can post a message (webhook, bot API, test double).
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Human-readable destination name, used in logs.
    fn name(&self) -> &str;

    /// Make exactly one delivery attempt.
    async fn send(&self, message: &OutgoingMessage) -> Result<Receipt, SendError>;
}
