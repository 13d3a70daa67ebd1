//! Polling acquisition with a deadline.
//!
//! The lock itself never waits. Callers that want to wait for a live owner to
//! go away poll with exponential backoff until a deadline passes.

use super::{LockGuard, Lockfile};
use crate::error::Result;
use std::thread;
use std::time::{Duration, Instant};

/// Default total time to keep polling.
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default delay before the first retry.
const BASE_DELAY_MS: u64 = 50;

/// Upper bound for a single backoff delay.
const MAX_DELAY_MS: u64 = 1_000;

/// How long and how often to poll for a busy lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total time to keep trying. Zero means a single attempt.
    pub timeout: Duration,
    /// Delay before the first retry; doubles each attempt.
    pub base_delay: Duration,
    /// Upper bound for a single delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            base_delay: Duration::from_millis(BASE_DELAY_MS),
            max_delay: Duration::from_millis(MAX_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with default timings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the total time to keep polling.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the delay before the first retry.
    #[must_use]
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Set the upper bound for a single delay.
    #[must_use]
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    fn delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Take the lock, polling while it is busy or contended until the policy's
/// timeout elapses.
///
/// The last `Busy` or `Contention` error is returned on timeout. Any other
/// error is returned immediately. A timeout too large to represent as an
/// `Instant` means waiting without a deadline.
pub fn acquire_with_retry(lockfile: &Lockfile, policy: &RetryPolicy) -> Result<LockGuard> {
    let deadline = Instant::now().checked_add(policy.timeout);
    let mut attempt = 0;

    loop {
        let err = match lockfile.lock() {
            Ok(guard) => return Ok(guard),
            Err(e) if e.is_retryable() => e,
            Err(e) => return Err(e),
        };

        let mut delay = policy.delay(attempt);
        if let Some(deadline) = deadline {
            let now = Instant::now();
            if now >= deadline {
                return Err(err);
            }
            delay = delay.min(deadline - now);
        }

        tracing::debug!(
            path = %lockfile.path().display(),
            attempt = attempt + 1,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "lock not available, retrying"
        );

        thread::sleep(delay);
        attempt += 1;
    }
}
