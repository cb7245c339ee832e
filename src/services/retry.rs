use std::future::Future;
use std::time::Duration;

use crate::error::ModelError;

/// Errors that can tell whether another attempt might succeed
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

impl Retryable for ModelError {
    fn is_retryable(&self) -> bool {
        ModelError::is_retryable(self)
    }
}

/// Bounded exponential backoff settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; total attempts are `max_retries + 1`
    pub max_retries: u32,
    /// Delay before the first retry, doubled after each one
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2, 1000)
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_delay_ms: u64) -> Self {
        Self {
            max_retries,
            initial_delay: Duration::from_millis(initial_delay_ms),
        }
    }

    /// Runs `operation`, retrying transient failures with exponential backoff
    ///
    /// Non-retryable failures, and the last failure once retries run out, are
    /// returned unchanged.
    pub async fn execute<T, E, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        E: Retryable + std::fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut remaining = self.max_retries;
        let mut delay = self.initial_delay;
        let mut attempt = 1u32;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if remaining > 0 && e.is_retryable() => {
                    tracing::warn!(
                        error = %e,
                        attempt,
                        remaining,
                        delay_ms = delay.as_millis() as u64,
                        "Transient model failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    remaining -= 1;
                    delay = delay.saturating_mul(2);
                    attempt += 1;
                }
                Err(e) => {
                    if e.is_retryable() {
                        tracing::error!(error = %e, attempts = attempt, "Retries exhausted");
                    }
                    return Err(e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::time::Instant;

    fn unavailable() -> ModelError {
        ModelError::Status {
            status: 503,
            body: "overloaded".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_two_transient_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let started = Instant::now();
        let attempts_at = Arc::new(Mutex::new(Vec::new()));

        let result = RetryPolicy::default()
            .execute(|| {
                let calls = calls.clone();
                let attempts_at = attempts_at.clone();
                async move {
                    attempts_at.lock().unwrap().push(started.elapsed());
                    match calls.fetch_add(1, Ordering::SeqCst) {
                        0 | 1 => Err(unavailable()),
                        _ => Ok("done"),
                    }
                }
            })
            .await;

        tokio_test::assert_ok!(&result);
        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        let attempts_at = attempts_at.lock().unwrap();
        assert_eq!(attempts_at[1] - attempts_at[0], Duration::from_millis(1000));
        assert_eq!(attempts_at[2] - attempts_at[1], Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_fails_immediately() {
        let calls = AtomicU32::new(0);
        let started = Instant::now();

        let result: Result<(), ModelError> = RetryPolicy::default()
            .execute(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(ModelError::SafetyBlocked("blockReason".to_string())) }
            })
            .await;

        assert_eq!(
            result.unwrap_err(),
            ModelError::SafetyBlocked("blockReason".to_string())
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_retries_return_last_error() {
        let calls = AtomicU32::new(0);

        let result: Result<(), ModelError> = RetryPolicy::default()
            .execute(|| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    Err(ModelError::Network(format!("attempt {}", n + 1)))
                }
            })
            .await;

        assert_eq!(
            result.unwrap_err(),
            ModelError::Network("attempt 3".to_string())
        );
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_is_retried() {
        let calls = AtomicU32::new(0);

        let result = RetryPolicy::new(1, 10)
            .execute(|| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(ModelError::Status {
                            status: 429,
                            body: String::new(),
                        })
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_retries_single_attempt() {
        let calls = AtomicU32::new(0);

        let result: Result<(), ModelError> = RetryPolicy::new(0, 1000)
            .execute(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(unavailable()) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
