//! Bounded retry with an injectable delay.
//!
//! Only the `initialize` handshake retries. The delay goes through
//! [`Sleeper`] so tests can observe the schedule without waiting.

use std::{future::Future, time::Duration};

use async_trait::async_trait;
use tracing::warn;

use super::errors::ClientError;

/// Attempts made before `initialize` gives up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Pause between `initialize` attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Per-attempt timeout for `initialize`.
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for calls other than `initialize`. These are single-attempt.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Retry schedule and request timeouts for a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
    pub attempt_timeout: Duration,
    /// Applies to `getTools` and `executeTool`, which never retry.
    pub call_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }
}

/// Delay strategy between attempts.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, delay: Duration);
}

/// [`Sleeper`] backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Runs `op` up to `policy.max_attempts` times, sleeping between failures.
///
/// `op` receives the 1-based attempt number. Exhaustion yields
/// [`ClientError::InitializationFailed`] naming the attempt count and the
/// last failure.
pub async fn run_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    mut op: F,
) -> Result<T, ClientError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let attempts = policy.max_attempts.max(1);
    let mut last_error = None;

    for attempt in 1..=attempts {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) => {
                warn!(attempt, max_attempts = attempts, error = %e, "attempt failed");
                if attempt < attempts {
                    sleeper.sleep(policy.delay).await;
                }
                last_error = Some(e);
            }
        }
    }

    Err(ClientError::InitializationFailed {
        attempts,
        reason: last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no attempt was made".to_string()),
    })
}
