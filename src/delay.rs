//! Delay primitive.
//!
//! Suspends the current task for a fixed duration. A zero duration still
//! suspends once, so the caller always resumes on a later scheduling turn.

use std::time::Duration;

use crate::error::{Result, SeqflowError};

/// Wait for `duration`, then resume. Never fails.
pub async fn delay(duration: Duration) {
    if duration.is_zero() {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(duration).await;
    }
}

/// Wait for `ms` milliseconds.
pub async fn delay_ms(ms: u64) {
    delay(Duration::from_millis(ms)).await
}

/// Convert a signed millisecond count into an interval.
///
/// Negative values are rejected here, before anything is scheduled.
pub fn interval_from_millis(ms: i64) -> Result<Duration> {
    u64::try_from(ms)
        .map(Duration::from_millis)
        .map_err(|_| SeqflowError::InvalidArgument(format!("interval must be >= 0 ms (got {})", ms)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_delay_waits_for_duration() {
        let start = Instant::now();
        delay(Duration::from_millis(250)).await;
        assert!(start.elapsed() >= Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_ms() {
        let start = Instant::now();
        delay_ms(40).await;
        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[tokio::test]
    async fn test_zero_delay_is_not_synchronous() {
        let flag = Arc::new(AtomicBool::new(false));
        let other = flag.clone();

        // current_thread runtime: the spawned task can only run if delay yields
        tokio::spawn(async move {
            other.store(true, Ordering::SeqCst);
        });

        delay(Duration::ZERO).await;
        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn test_interval_from_millis() {
        assert_eq!(interval_from_millis(0).unwrap(), Duration::ZERO);
        assert_eq!(interval_from_millis(1500).unwrap(), Duration::from_millis(1500));
    }

    #[test]
    fn test_interval_from_millis_rejects_negative() {
        let err = interval_from_millis(-5).unwrap_err();
        assert!(matches!(err, SeqflowError::InvalidArgument(_)));
        assert!(err.to_string().contains("-5"));
    }
}
