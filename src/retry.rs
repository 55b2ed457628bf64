//! Retry scheduling for remote translation calls.
//!
//! The policy is pure delay arithmetic so it can be tested without a
//! provider or a clock; the caller owns the actual sleeping.

use std::time::Duration;

/// Retry schedule for a remote call: bounded attempts with a linear
/// pre-attempt backoff and a fixed cooldown after each failure.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first.
    pub max_attempts: u32,
    /// Base delay the schedule scales from.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(3),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with the given attempt count and base delay.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Delay to wait before the given zero-based attempt.
    ///
    /// The first attempt starts immediately; attempt `n` waits
    /// `base_delay * (n + 1)`, growing linearly.
    pub fn backoff_before(&self, attempt: u32) -> Option<Duration> {
        if attempt == 0 {
            None
        } else {
            Some(self.base_delay * (attempt + 1))
        }
    }

    /// Cooldown to wait after a failed attempt that will be retried.
    pub fn failure_cooldown(&self) -> Duration {
        self.base_delay * 2
    }

    /// Returns true when the given zero-based attempt is the last one.
    pub fn is_final_attempt(&self, attempt: u32) -> bool {
        attempt + 1 >= self.max_attempts
    }
}
