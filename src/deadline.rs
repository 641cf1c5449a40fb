//! Bounded-call primitive: run an operation against a deadline.
//!
//! Anywhere the app needs "do this network call, but give up after N
//! seconds", it goes through [`with_deadline`] instead of hand-rolling a
//! timer race. The losing side of the race is dropped, so a response that
//! arrives after the deadline can never mutate state.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// The deadline fired before the operation settled.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Operation did not complete within {0:?}")]
pub struct DeadlineElapsed(pub Duration);

/// Races `operation` against `deadline`. Whichever settles first wins; the
/// loser is cancelled by drop and its eventual result is never observed.
pub async fn with_deadline<F, T>(deadline: Duration, operation: F) -> Result<T, DeadlineElapsed>
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(deadline, operation).await {
        Ok(value) => Ok(value),
        Err(_) => {
            debug!(?deadline, "Deadline elapsed before operation settled");
            Err(DeadlineElapsed(deadline))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn fast_operation_wins() {
        let result = with_deadline(Duration::from_secs(5), async { 42 }).await;
        assert_eq!(result, Ok(42));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_operation_loses_and_is_dropped() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = finished.clone();

        let result = with_deadline(Duration::from_millis(100), async move {
            tokio::time::sleep(Duration::from_secs(60)).await;
            flag.store(true, Ordering::SeqCst);
        })
        .await;

        assert_eq!(result, Err(DeadlineElapsed(Duration::from_millis(100))));

        // Let virtual time run well past the operation's sleep; the future
        // was dropped at the deadline so the flag must never flip.
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert!(!finished.load(Ordering::SeqCst));
    }
}
