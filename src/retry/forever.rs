//! Unbounded retry: poll an operation until it succeeds.
//!
//! There is no failure outcome. A call that never sees a success never
//! completes, so this belongs only where the caller can live with that.

use std::future::Future;
use std::time::Duration;

use crate::delay::delay;

/// Retry an operation with a constant interval and no attempt limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryForever {
    interval: Duration,
}

impl RetryForever {
    /// Create a poller that waits `interval` after each failure.
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Interval between a failure and the next attempt.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run `op` until it succeeds. Failures are dropped unseen.
    pub async fn run<F, Fut, T, E>(&self, op: F) -> T
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.run_observed(op, |_: &E, _| {}).await
    }

    /// Run `op` until it succeeds, handing each failure and its 1-based
    /// attempt number to `on_failure` before waiting.
    pub async fn run_observed<F, Fut, T, E, O>(&self, mut op: F, mut on_failure: O) -> T
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        O: FnMut(&E, u64),
    {
        let mut failures: u64 = 0;
        loop {
            match op().await {
                Ok(value) => return value,
                Err(e) => {
                    failures = failures.saturating_add(1);
                    on_failure(&e, failures);
                    drop(e);
                    delay(self.interval).await;
                }
            }
        }
    }
}

/// Run `op` until it succeeds, waiting `interval` after every failure.
pub async fn retry_forever<F, Fut, T, E>(interval: Duration, op: F) -> T
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    RetryForever::new(interval).run(op).await
}
