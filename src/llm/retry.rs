use std::future::Future;
use std::time::Duration;

use super::ModelError;

/// Per-attempt timeout plus bounded retry with exponential backoff.
///
/// Only [transient](ModelError::is_transient) failures are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_backoff: Duration::from_millis(500),
            timeout: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (0-based).
    pub fn backoff(&self, retry: u32) -> Duration {
        self.initial_backoff.saturating_mul(1 << retry.min(16))
    }

    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, ModelError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ModelError>>,
    {
        let mut retry = 0;
        loop {
            let result = match tokio::time::timeout(self.timeout, operation()).await {
                Ok(result) => result,
                Err(_) => Err(ModelError::Timeout(self.timeout)),
            };

            match result {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && retry < self.max_retries => {
                    let delay = self.backoff(retry);
                    retry += 1;
                    log::warn!(
                        "model request failed ({}), retry {}/{} in {:?}",
                        err,
                        retry,
                        self.max_retries,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn fast(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            initial_backoff: Duration::ZERO,
            timeout: Duration::from_millis(50),
        }
    }

    fn unavailable() -> ModelError {
        ModelError::Status {
            status: 503,
            body: "overloaded".to_string(),
        }
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(0), Duration::from_millis(500));
        assert_eq!(policy.backoff(1), Duration::from_millis(1000));
        assert_eq!(policy.backoff(2), Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn test_retries_transient_until_success() {
        let calls = Cell::new(0);
        let result = fast(2)
            .run(|| {
                calls.set(calls.get() + 1);
                let attempt = calls.get();
                async move {
                    if attempt < 3 {
                        Err(unavailable())
                    } else {
                        Ok(attempt)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let calls = Cell::new(0);
        let result: Result<(), _> = fast(1)
            .run(|| {
                calls.set(calls.get() + 1);
                async { Err(unavailable()) }
            })
            .await;

        assert!(matches!(result, Err(ModelError::Status { status: 503, .. })));
        assert_eq!(calls.get(), 2);
    }

    #[tokio::test]
    async fn test_does_not_retry_fatal_errors() {
        let calls = Cell::new(0);
        let result: Result<(), _> = fast(3)
            .run(|| {
                calls.set(calls.get() + 1);
                async {
                    Err(ModelError::Status {
                        status: 401,
                        body: "invalid api key".to_string(),
                    })
                }
            })
            .await;

        assert!(matches!(result, Err(ModelError::Status { status: 401, .. })));
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_times_out_slow_attempts() {
        let calls = Cell::new(0);
        let result: Result<(), _> = fast(1)
            .run(|| {
                calls.set(calls.get() + 1);
                async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Ok(())
                }
            })
            .await;

        assert!(matches!(result, Err(ModelError::Timeout(_))));
        assert_eq!(calls.get(), 2);
    }
}
