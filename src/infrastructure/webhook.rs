//! # Webhook Sink
//!
//! Implements `MessageSink` for chat platforms that accept incoming webhooks
//! (JSON `{"content": ..., "username": ...}` POSTed to a secret URL).
//! Rate-limit hints are read from the `Retry-After` header, falling back to a
//! `retry_after` field in the JSON error body.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use reqwest::header::RETRY_AFTER;
use serde::Deserialize;
use std::time::Duration;

use crate::domain::signal::parse_retry_after;
use crate::domain::traits::MessageSink;
use crate::domain::types::{OutgoingMessage, Receipt, SendError};

/// Fields we care about in a platform's JSON reply (success or error).
#[derive(Debug, Default, Deserialize)]
struct WebhookReply {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    retry_after: Option<f64>,
}

#[derive(Clone)]
pub struct WebhookSink {
    name: String,
    url: String,
    client: Client,
}

impl WebhookSink {
    pub fn new(name: impl Into<String>, url: impl Into<String>, timeout: Duration) -> Result<Self, SendError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SendError::Transport(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            name: name.into(),
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl MessageSink for WebhookSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, message: &OutgoingMessage) -> Result<Receipt, SendError> {
        let response = self
            .client
            .post(&self.url)
            .json(message)
            .send()
            .await
            .map_err(|e| SendError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let retry_after_header = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response body".to_string());

        if (200..300).contains(&status) {
            Ok(receipt_from(status, &body))
        } else {
            Err(failure_from(status, retry_after_header.as_deref(), body))
        }
    }
}

fn receipt_from(status: u16, body: &str) -> Receipt {
    let reply: WebhookReply = serde_json::from_str(body).unwrap_or_default();
    let id = reply.id.and_then(|id| match id {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    });
    Receipt { status, id }
}

fn failure_from(status: u16, retry_after_header: Option<&str>, body: String) -> SendError {
    let retry_after = retry_after_header
        .and_then(|raw| parse_retry_after(raw, Utc::now()))
        .or_else(|| {
            serde_json::from_str::<WebhookReply>(&body)
                .ok()
                .and_then(|reply| reply.retry_after)
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        });

    SendError::Http {
        status,
        retry_after,
        body,
    }
}
