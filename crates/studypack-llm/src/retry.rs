//! Retry policy for model calls
//!
//! A failed call is retried only when the error is transient (see
//! [`LlmError::is_transient`]). The delay before retry `n` (0-based) is
//! `base_delay * 2^n`, so the default policy of 5 attempts with a one-second
//! base sleeps 1, 2, 4, 8 and 16 seconds, 31 seconds in total, before giving
//! up with [`LlmError::PersistentFailure`]. Any other error is returned
//! immediately.
//!
//! Sleeping uses `tokio::time::sleep`, which suspends the task instead of
//! blocking a worker thread.

use crate::{CompletionRequest, LlmError, ModelClient};
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Default number of attempts
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default base delay between attempts
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Exponential backoff policy
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    retriable: fn(&LlmError) -> bool,
}

impl RetryPolicy {
    /// Create a policy that retries transient errors
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            retriable: LlmError::is_transient,
        }
    }

    /// Replace the retriable-error predicate
    pub fn with_predicate(mut self, retriable: fn(&LlmError) -> bool) -> Self {
        self.retriable = retriable;
        self
    }

    /// Maximum number of attempts
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay slept after failed attempt `attempt` (0-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Total delay slept when every attempt fails with a retriable error
    pub fn total_backoff(&self) -> Duration {
        (0..self.max_attempts).map(|a| self.delay_for(a)).sum()
    }

    /// Run `op` under this policy
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, LlmError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, LlmError>>,
    {
        for attempt in 0..self.max_attempts {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if (self.retriable)(&e) => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        attempt = attempt + 1,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "Model call failed: {}. Retrying",
                        e
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }

        Err(LlmError::PersistentFailure {
            attempts: self.max_attempts,
        })
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_BASE_DELAY)
    }
}

/// A [`ModelClient`] that applies a [`RetryPolicy`] to every call
#[derive(Debug, Clone)]
pub struct RetryingClient<C> {
    inner: C,
    policy: RetryPolicy,
}

impl<C: ModelClient> RetryingClient<C> {
    /// Wrap `inner` with `policy`
    pub fn new(inner: C, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// The wrapped client
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// The policy in effect
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

#[async_trait]
impl<C: ModelClient> ModelClient for RetryingClient<C> {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.policy.run(|| self.inner.complete(request)).await
    }
}
