//! Retry policy for transient network failures.
//!
//! The profile fetch runs on every session restore and must tolerate a
//! network hiccup without forcing a spurious logout, so it retries transient
//! failures a few times before surfacing them. The attempt count and pause
//! are configuration, not business rules; the defaults match the backend
//! deployment this client was written against.

use std::future::Future;
use std::time::Duration;

use crate::errors::{ApiError, ApiResult};

/// How often and how patiently to retry a transient failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Fixed pause between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

/// Runs `op` until it succeeds, fails non-transiently, or exhausts the
/// policy's attempts.
///
/// Only [`ApiError::is_transient`] failures are retried: a 401 or a backend
/// `success: false` answer is returned immediately.
pub async fn retry_transient<T, F, Fut>(policy: RetryPolicy, mut op: F) -> ApiResult<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < policy.max_attempts => {
                tracing::warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    error = %err,
                    "transient failure, retrying"
                );
                tokio::time::sleep(policy.delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
