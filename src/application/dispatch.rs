//! # Dispatcher
//!
//! Delivers one message through a `MessageSink`, absorbing rate limits via the
//! invoker. Every delivery path (CLI, future integrations) goes through here, so
//! retry behavior lives in exactly one place.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{debug, error, info, warn};

use crate::application::invoker::{InvokeError, RateLimitedInvoker};
use crate::domain::policy::RetryPolicy;
use crate::domain::signal::RateLimitSignal;
use crate::domain::traits::MessageSink;
use crate::domain::types::{OutgoingMessage, Receipt, SendError};
use crate::strings::logs;

type Classifier = fn(&SendError) -> RateLimitSignal;

pub struct Dispatcher<S: MessageSink + ?Sized> {
    sink: Arc<S>,
    invoker: RateLimitedInvoker<Classifier>,
}

impl<S: MessageSink + ?Sized> Dispatcher<S> {
    pub fn new(sink: Arc<S>, policy: RetryPolicy) -> Self {
        Self {
            sink,
            invoker: RateLimitedInvoker::new(policy, SendError::signal as Classifier),
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        self.invoker.policy()
    }

    /// Send `message`, retrying while the platform throttles us.
    pub async fn deliver(
        &self,
        message: &OutgoingMessage,
    ) -> Result<Receipt, InvokeError<SendError>> {
        if message.content.trim().is_empty() {
            return Err(InvokeError::NonRetryable(SendError::InvalidMessage(
                "message content is empty".into(),
            )));
        }

        let destination = self.sink.name();
        let max_attempts = self.policy().max_attempts();
        let attempts = AtomicU32::new(0);

        let result = self
            .invoker
            .invoke(|| {
                let attempt = attempts.fetch_add(1, Ordering::Relaxed) + 1;
                debug!("{}", logs::attempt_started(destination, attempt, max_attempts));
                async move {
                    let outcome = self.sink.send(message).await;
                    if let Err(e) = &outcome {
                        let signal = e.signal();
                        if signal.is_rate_limited && attempt < max_attempts {
                            let wait = self.policy().backoff_for(&signal);
                            warn!(
                                "{}",
                                logs::rate_limited(destination, attempt, max_attempts, wait)
                            );
                        }
                    }
                    outcome
                }
            })
            .await;

        let attempts = attempts.load(Ordering::Relaxed);
        match &result {
            Ok(receipt) if attempts > 1 => {
                info!("{}", logs::delivered_after_retry(destination, attempts, receipt.status))
            }
            Ok(receipt) => debug!("{}", logs::delivered(destination, receipt.status)),
            Err(InvokeError::RetryBudgetExhausted { attempts, .. }) => {
                error!("{}", logs::budget_exhausted(destination, *attempts))
            }
            Err(InvokeError::NonRetryable(e)) => error!("{}", logs::send_failed(destination, e)),
        }

        result
    }
}
