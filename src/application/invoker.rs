//! Rate-limit-aware invocation of a single outbound operation.
//!
//! The invoker:
//! - Runs the operation up to `max_attempts` times, strictly sequentially
//! - Retries only failures the classifier marks as rate-limited
//! - Waits `max(retry_after or default_backoff, min_backoff)` between attempts
//! - Surfaces any other failure unchanged after the attempt that produced it
//! - Reports `RetryBudgetExhausted` when the last attempt is still throttled
//!
//! It holds no state between calls and never logs; callers own both.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;

use crate::domain::policy::RetryPolicy;
use crate::domain::signal::RateLimitClassifier;

/// Terminal failure of an invocation.
#[derive(Debug, Error, PartialEq)]
pub enum InvokeError<E> {
    /// The operation failed with something other than a rate limit.
    #[error("{0}")]
    NonRetryable(#[source] E),
    /// Every attempt in the budget was rate-limited.
    #[error("gave up after {attempts} rate-limited attempts")]
    RetryBudgetExhausted {
        attempts: u32,
        last_retry_after: Option<Duration>,
    },
}

impl<E> InvokeError<E> {
    pub fn is_budget_exhausted(&self) -> bool {
        matches!(self, InvokeError::RetryBudgetExhausted { .. })
    }

    /// The original failure, if this was not a budget exhaustion.
    pub fn into_non_retryable(self) -> Option<E> {
        match self {
            InvokeError::NonRetryable(error) => Some(error),
            InvokeError::RetryBudgetExhausted { .. } => None,
        }
    }
}

/// Binds a policy to a classifier so callers only supply the operation.
#[derive(Debug, Clone)]
pub struct RateLimitedInvoker<C> {
    policy: RetryPolicy,
    classifier: C,
}

impl<C> RateLimitedInvoker<C> {
    pub fn new(policy: RetryPolicy, classifier: C) -> Self {
        Self { policy, classifier }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub async fn invoke<F, Fut, T, E>(&self, operation: F) -> Result<T, InvokeError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        C: RateLimitClassifier<E>,
    {
        invoke(operation, &self.policy, &self.classifier).await
    }
}

/// Run `operation` under `policy`, retrying the failures `classifier` calls rate limits.
pub async fn invoke<F, Fut, T, E, C>(
    mut operation: F,
    policy: &RetryPolicy,
    classifier: &C,
) -> Result<T, InvokeError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    C: RateLimitClassifier<E> + ?Sized,
{
    let max_attempts = policy.max_attempts();

    for attempt in 1..=max_attempts {
        let error = match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        let signal = classifier.classify(&error);
        if !signal.is_rate_limited {
            return Err(InvokeError::NonRetryable(error));
        }

        if attempt == max_attempts {
            return Err(InvokeError::RetryBudgetExhausted {
                attempts: attempt,
                last_retry_after: signal.retry_after,
            });
        }

        sleep(policy.backoff_for(&signal)).await;
    }

    // max_attempts >= 1, so the loop always returns
    Err(InvokeError::RetryBudgetExhausted {
        attempts: max_attempts,
        last_retry_after: None,
    })
}
