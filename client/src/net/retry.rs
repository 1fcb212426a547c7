//! Bounded retry with exponential backoff.
//!
//! TRADE-OFFS
//! ==========
//! Retries are blind: no idempotency key travels with the request, so a write
//! that reached the server before failing may be applied twice. The policy is
//! therefore chosen per call, and writes default to [`RetryPolicy::NONE`].

#[cfg(test)]
#[path = "retry_test.rs"]
mod retry_test;

use std::future::Future;
use std::time::Duration;

use super::error::ApiError;

/// How many times to attempt a call and how long to wait between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Always at least 1.
    pub max_attempts: u32,
    /// Wait before the second attempt; doubles for each later attempt.
    pub initial_delay: Duration,
}

impl RetryPolicy {
    /// Single attempt, fail immediately.
    pub const NONE: Self = Self { max_attempts: 1, initial_delay: Duration::ZERO };

    /// Three attempts, waiting 1s then 2s.
    pub const STANDARD: Self = Self { max_attempts: 3, initial_delay: Duration::from_millis(1000) };

    #[must_use]
    pub const fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        let max_attempts = if max_attempts == 0 { 1 } else { max_attempts };
        Self { max_attempts, initial_delay }
    }

    /// Delay slept after failed attempt number `attempt` (1-based).
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2_u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_delay.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::NONE
    }
}

/// Run `op` under `policy`, retrying transient failures.
///
/// Non-transient errors (401, other 4xx, decode failures) return immediately.
///
/// # Errors
///
/// Returns the last error once attempts are exhausted or a non-transient
/// error occurs.
pub async fn run<T, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt = 1_u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < policy.max_attempts && err.is_transient() => {
                let delay = policy.delay_after(attempt);
                tracing::warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "request failed; retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
