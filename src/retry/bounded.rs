//! Bounded retry with a constant interval.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::delay::{delay, interval_from_millis};
use crate::error::{Result, SeqflowError};

/// Successful outcome of a bounded retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retried<T> {
    /// Value produced by the successful attempt.
    pub value: T,
    /// Failed attempts that preceded the success (the success itself is not counted).
    pub attempts: u32,
}

impl<T> Retried<T> {
    /// Discard the attempt count.
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Terminal failure of a bounded retry.
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// The retry budget ran out. Carries the last failure and how many attempts failed.
    #[error("{source}, retries:{attempts}")]
    Exhausted {
        /// Error returned by the final attempt.
        source: E,
        /// Total failed attempts, including the first one.
        attempts: u32,
    },
}

impl<E> RetryError<E> {
    /// Total failed attempts, including the first one.
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Exhausted { attempts, .. } => *attempts,
        }
    }

    /// Retries performed after the first attempt.
    pub fn retries(&self) -> u32 {
        self.attempts().saturating_sub(1)
    }

    /// Borrow the error returned by the final attempt.
    pub fn last_error(&self) -> &E {
        match self {
            Self::Exhausted { source, .. } => source,
        }
    }

    /// Recover the operation's own error.
    pub fn into_source(self) -> E {
        match self {
            Self::Exhausted { source, .. } => source,
        }
    }
}

/// How many extra attempts to make and how long to wait between them.
///
/// `times` counts retries beyond the first attempt, so `times = 0` means a
/// single attempt with no wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryPolicy {
    /// Additional attempts after the first.
    pub times: u32,
    /// Wait between a failure and the next attempt.
    pub interval: Duration,
}

impl RetryPolicy {
    /// Create a policy.
    pub fn new(times: u32, interval: Duration) -> Self {
        Self { times, interval }
    }

    /// Build a policy from signed inputs, rejecting negatives.
    pub fn from_millis(times: i64, interval_ms: i64) -> Result<Self> {
        let times = u32::try_from(times)
            .map_err(|_| SeqflowError::InvalidArgument(format!("times must be in 0..={} (got {})", u32::MAX, times)))?;
        let interval = interval_from_millis(interval_ms)?;
        Ok(Self::new(times, interval))
    }

    /// Upper bound on how many times the operation is invoked.
    pub fn max_attempts(&self) -> u64 {
        u64::from(self.times) + 1
    }

    /// Invoke `op` until it succeeds or the budget is spent.
    pub async fn run<F, Fut, T, E>(&self, mut op: F) -> std::result::Result<Retried<T>, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        let mut failures: u32 = 0;

        loop {
            match op().await {
                Ok(value) => {
                    if failures > 0 {
                        tracing::debug!(attempts = failures, "operation succeeded after retries");
                    }
                    return Ok(Retried {
                        value,
                        attempts: failures,
                    });
                }
                Err(last_error) => {
                    failures = failures.saturating_add(1);
                    if failures > self.times {
                        tracing::debug!(attempts = failures, "retry budget exhausted");
                        return Err(RetryError::Exhausted {
                            source: last_error,
                            attempts: failures,
                        });
                    }
                    tracing::debug!(
                        attempt = failures,
                        interval_ms = u64::try_from(self.interval.as_millis()).unwrap_or(u64::MAX),
                        "attempt failed, retrying"
                    );
                    delay(self.interval).await;
                }
            }
        }
    }
}

/// Invoke `op`, retrying up to `times` more times with `interval` between attempts.
pub async fn retry<F, Fut, T, E>(
    op: F,
    times: u32,
    interval: Duration,
) -> std::result::Result<Retried<T>, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
{
    RetryPolicy::new(times, interval).run(op).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tokio::time::Instant;

    /// Fails the first `failures` calls, then returns the call number
    fn flaky(calls: &Cell<u32>, failures: u32) -> impl Future<Output = std::result::Result<u32, String>> + '_ {
        async move {
            let n = calls.get() + 1;
            calls.set(n);
            if n <= failures { Err(format!("failure {}", n)) } else { Ok(n) }
        }
    }

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let calls = Cell::new(0);
        let result = retry(|| flaky(&calls, 0), 3, Duration::ZERO).await.unwrap();

        assert_eq!(result.value, 1);
        assert_eq!(result.attempts, 0);
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_zero_times_is_a_single_attempt() {
        let calls = Cell::new(0);
        let start = Instant::now();

        let err = retry(|| flaky(&calls, u32::MAX), 0, Duration::ZERO).await.unwrap_err();

        assert_eq!(calls.get(), 1);
        assert_eq!(err.attempts(), 1);
        assert_eq!(err.retries(), 0);
        assert_eq!(err.last_error(), "failure 1");
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_and_counts_only_failures() {
        let calls = Cell::new(0);
        let start = Instant::now();

        let result = retry(|| flaky(&calls, 2), 3, Duration::from_millis(100))
            .await
            .unwrap();

        assert_eq!(result.value, 3);
        assert_eq!(result.attempts, 2);
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(200));
        assert!(elapsed < Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_reports_last_error() {
        let calls = Cell::new(0);
        let start = Instant::now();

        let err = retry(|| flaky(&calls, u32::MAX), 2, Duration::from_millis(50))
            .await
            .unwrap_err();

        assert_eq!(calls.get(), 3);
        assert!(matches!(err, RetryError::Exhausted { attempts: 3, .. }));
        assert_eq!(err.to_string(), "failure 3, retries:3");
        // No wait after the final failure
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(100));
        assert!(elapsed < Duration::from_millis(150));
        assert_eq!(err.into_source(), "failure 3");
    }

    #[tokio::test]
    async fn test_budget_exactly_matches_failures() {
        let calls = Cell::new(0);
        let result = retry(|| flaky(&calls, 2), 2, Duration::ZERO).await.unwrap();
        assert_eq!(result.attempts, 2);
        assert_eq!(result.into_value(), 3);
    }

    #[tokio::test]
    async fn test_policy_is_reusable_with_fresh_counters() {
        let policy = RetryPolicy::new(1, Duration::ZERO);

        let first = Cell::new(0);
        let a = policy.run(|| flaky(&first, 1)).await.unwrap();
        let second = Cell::new(0);
        let b = policy.run(|| flaky(&second, 0)).await.unwrap();

        assert_eq!(a.attempts, 1);
        assert_eq!(b.attempts, 0);
    }

    #[test]
    fn test_policy_from_millis() {
        let policy = RetryPolicy::from_millis(4, 250).unwrap();
        assert_eq!(policy.times, 4);
        assert_eq!(policy.interval, Duration::from_millis(250));
        assert_eq!(policy.max_attempts(), 5);
    }

    #[test]
    fn test_policy_from_millis_rejects_negative() {
        assert!(matches!(
            RetryPolicy::from_millis(-1, 0),
            Err(SeqflowError::InvalidArgument(_))
        ));
        assert!(matches!(
            RetryPolicy::from_millis(1, -10),
            Err(SeqflowError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_default_policy_is_single_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.times, 0);
        assert_eq!(policy.interval, Duration::ZERO);
        assert_eq!(policy.max_attempts(), 1);
    }

    #[test]
    fn test_exhausted_message_format() {
        let err = RetryError::Exhausted {
            source: "boom".to_string(),
            attempts: 1,
        };
        assert_eq!(err.to_string(), "boom, retries:1");
        assert_eq!(err.into_source(), "boom");
    }

    #[test]
    fn test_exhausted_exposes_io_source() {
        use std::error::Error as _;

        let err = RetryError::Exhausted {
            source: std::io::Error::other("refused"),
            attempts: 4,
        };
        assert_eq!(err.retries(), 3);
        assert_eq!(err.source().map(|s| s.to_string()), Some("refused".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_interval_is_logged_without_overflow() {
        let calls = Cell::new(0);
        let policy = RetryPolicy::new(1, Duration::MAX);

        // First attempt fails and the interval does not fit in u64 milliseconds
        let handle = policy.run(|| flaky(&calls, 1));
        let result = tokio::time::timeout(Duration::from_secs(1), handle).await;

        assert!(result.is_err());
        assert_eq!(calls.get(), 1);
    }
}
