//! Rate limiting for outbound API calls
//!
//! A minimum-interval limiter: each caller waits until the configured
//! interval has passed since the previous call, then stamps the current
//! time. This is a last-call timestamp, not a token bucket, so there is no
//! burst allowance.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use nutrisearch_core::rate_limit::MinIntervalLimiter;
//!
//! # async fn example() {
//! let limiter = MinIntervalLimiter::new(Duration::from_millis(500));
//! limiter.wait().await;
//! // Proceed with API call
//! # }
//! ```

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Default spacing between upstream requests
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(500);

/// Enforces a minimum spacing between consecutive calls
#[derive(Debug)]
pub struct MinIntervalLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl MinIntervalLimiter {
    /// Create a new limiter
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval,
        }
    }

    /// Configured minimum interval
    #[must_use]
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until a request may be sent, then record it
    ///
    /// The lock is held across the sleep so concurrent callers queue up
    /// behind each other instead of observing the same stale timestamp.
    /// Returns how long this call slept.
    pub async fn wait(&self) -> Duration {
        let mut last = self.last_request.lock().await;
        let mut waited = Duration::ZERO;

        if let Some(previous) = *last {
            let ready_at = previous + self.min_interval;
            let now = Instant::now();
            if now < ready_at {
                waited = ready_at - now;
                debug!(wait_ms = waited.as_millis(), "Rate limit delay");
                tokio::time::sleep_until(ready_at).await;
            }
        }

        *last = Some(Instant::now());
        waited
    }

    /// Time until the next call would proceed without sleeping
    pub async fn time_until_ready(&self) -> Duration {
        let last = self.last_request.lock().await;
        match *last {
            Some(previous) => (previous + self.min_interval).saturating_duration_since(Instant::now()),
            None => Duration::ZERO,
        }
    }

    /// Forget the previous call
    pub async fn reset(&self) {
        *self.last_request.lock().await = None;
    }
}

impl Default for MinIntervalLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_first_call_does_not_wait() {
        let limiter = MinIntervalLimiter::default();
        assert_eq!(limiter.wait().await, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_back_to_back_calls_are_spaced() {
        let limiter = MinIntervalLimiter::default();

        limiter.wait().await;
        let first = Instant::now();
        limiter.wait().await;
        let second = Instant::now();

        assert!(second.duration_since(first) >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_after_interval_elapsed() {
        let limiter = MinIntervalLimiter::default();

        limiter.wait().await;
        tokio::time::advance(Duration::from_millis(600)).await;

        assert_eq!(limiter.wait().await, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_partial_wait() {
        let limiter = MinIntervalLimiter::default();

        limiter.wait().await;
        tokio::time::advance(Duration::from_millis(200)).await;

        assert_eq!(limiter.time_until_ready().await, Duration::from_millis(300));
        assert_eq!(limiter.wait().await, Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_queue() {
        let limiter = Arc::new(MinIntervalLimiter::default());
        let start = Instant::now();

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                tokio::spawn(async move {
                    limiter.wait().await;
                    Instant::now()
                })
            })
            .collect();

        let mut stamps = Vec::new();
        for handle in handles {
            stamps.push(handle.await.unwrap());
        }
        stamps.sort();

        assert!(stamps[2].duration_since(start) >= Duration::from_millis(1000));
        for pair in stamps.windows(2) {
            assert!(pair[1].duration_since(pair[0]) >= Duration::from_millis(500));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset() {
        let limiter = MinIntervalLimiter::default();

        limiter.wait().await;
        limiter.reset().await;

        assert_eq!(limiter.time_until_ready().await, Duration::ZERO);
        assert_eq!(limiter.wait().await, Duration::ZERO);
    }
}
