//! Bounded retry with exponential backoff.
//!
//! Used where the backend is only eventually consistent, e.g. a profile
//! row created by a sign-up trigger that may lag behind the account itself.
//! Every loop here has a hard attempt cap; callers supply the fallback.

use std::future::Future;
use std::time::Duration;

/// Tunable parameters for the backoff strategy.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Zero behaves like one.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub initial_delay: Duration,
    /// Upper bound on the delay between attempts.
    pub max_delay: Duration,
    /// Factor by which the delay grows after each miss.
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(2),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

/// Calculate the next backoff delay, clamped to [`RetryPolicy::max_delay`].
pub fn next_delay(current: Duration, policy: &RetryPolicy) -> Duration {
    let next_ms = (current.as_millis() as f64 * policy.multiplier) as u64;
    Duration::from_millis(next_ms).min(policy.max_delay)
}

/// Run `attempt` until it yields `Some`, at most `policy.max_attempts`
/// times, sleeping between misses. Returns `None` once attempts run out.
pub async fn retry_until_some<T, F, Fut>(policy: &RetryPolicy, mut attempt: F) -> Option<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut delay = policy.initial_delay;

    for n in 1..=max_attempts {
        if let Some(value) = attempt(n).await {
            return Some(value);
        }
        if n == max_attempts {
            break;
        }
        tracing::debug!(
            attempt = n,
            delay_ms = delay.as_millis() as u64,
            "Value not available yet, retrying",
        );
        tokio::time::sleep(delay).await;
        delay = next_delay(delay, policy);
    }

    None
}
