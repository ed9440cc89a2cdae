// src/error_recovery.rs
//! Retry with exponential backoff for transport failures.

use crate::constants::{
    TRANSPORT_RETRY_ATTEMPTS, TRANSPORT_RETRY_INITIAL_DELAY_MS, TRANSPORT_RETRY_MAX_DELAY_MS,
};
use crate::error::AppError;
use rand::Rng as _;
use std::time::Duration;

/// How often and how patiently a request is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: TRANSPORT_RETRY_ATTEMPTS,
            initial_delay: Duration::from_millis(TRANSPORT_RETRY_INITIAL_DELAY_MS),
            max_delay: Duration::from_millis(TRANSPORT_RETRY_MAX_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    /// A policy that gives up after the first failure.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }
}

/// Retries an async operation with exponential backoff and jitter.
///
/// Only errors for which [`AppError::is_transient`] holds are retried; any
/// other error is returned immediately.
pub async fn retry_with_backoff<F, T, Fut>(mut operation: F, policy: RetryPolicy) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, AppError>>,
{
    let mut delay = policy.initial_delay;
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if e.is_transient() && attempt < policy.max_attempts => {
                let pause = with_jitter(delay);
                log::warn!(
                    "Attempt {} failed ({}), retrying after {:?}",
                    attempt,
                    e,
                    pause
                );
                tokio::time::sleep(pause).await;

                delay = std::cmp::min(delay * 2, policy.max_delay);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Adds up to 50% random extra delay.
fn with_jitter(delay: Duration) -> Duration {
    let half = u64::try_from(delay.as_millis() / 2).unwrap_or(u64::MAX);
    if half == 0 {
        return delay;
    }
    delay + Duration::from_millis(rand::rng().random_range(0..=half))
}
