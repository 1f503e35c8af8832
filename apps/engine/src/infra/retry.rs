//! Bounded retry with exponential backoff for transient infra failures.
//!
//! One policy object, applied uniformly at the scheduling/notification/
//! storage boundary. Only `DomainError::is_transient()` classes are retried;
//! permanent failures (permission denied, validation, guard failures)
//! surface immediately.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Delay before the retry following attempt number `attempt` (1-based).
    fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(1u32 << (attempt - 1).min(16))
    }

    pub async fn run<T, F, Fut>(&self, op_name: &str, mut op: F) -> Result<T, DomainError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, DomainError>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < self.max_attempts => {
                    let delay = self.delay_after(attempt);
                    warn!(
                        op = op_name,
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "transient failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
