// src/retry.rs
//! Retry with a fixed backoff schedule for retrieval operations.
//!
//! The schedule is an explicit list of delays rather than a growth formula:
//! entry `i` is slept before retry `i + 1`, and its length is the maximum
//! number of retries.

use crate::constants::DEFAULT_RETRY_DELAYS;
use crate::error::RetrievalError;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Ordered delays between retry attempts. Cheap to clone; never mutated.
#[derive(Clone, PartialEq, Eq)]
pub struct RetrySchedule {
    delays: Arc<[Duration]>,
}

impl RetrySchedule {
    pub fn new(delays: impl Into<Vec<Duration>>) -> Self {
        Self {
            delays: delays.into().into(),
        }
    }

    /// A schedule that never retries.
    pub fn none() -> Self {
        Self::new(Vec::new())
    }

    /// Maximum number of retries after the first attempt.
    pub fn len(&self) -> usize {
        self.delays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }

    /// Delay to sleep before retry number `retry` (zero-based).
    pub fn delay_before(&self, retry: usize) -> Option<Duration> {
        self.delays.get(retry).copied()
    }

    pub fn delays(&self) -> &[Duration] {
        &self.delays
    }
}

impl Default for RetrySchedule {
    fn default() -> Self {
        Self::new(DEFAULT_RETRY_DELAYS.to_vec())
    }
}

impl fmt::Debug for RetrySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.delays.iter()).finish()
    }
}

/// Sleeps for `delay` unless `cancel` fires first.
pub async fn cancellable_sleep(
    delay: Duration,
    cancel: &CancellationToken,
) -> Result<(), RetrievalError> {
    if cancel.is_cancelled() {
        return Err(RetrievalError::Cancelled);
    }
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(RetrievalError::Cancelled),
        _ = tokio::time::sleep(delay) => Ok(()),
    }
}

/// Runs `operation` until it succeeds, fails terminally, or the schedule is
/// exhausted.
///
/// Terminal failures and cancellation are returned immediately. Once every
/// delay has been used, the last transient error is returned unchanged.
/// `label` only feeds the log lines.
pub async fn retry_with_schedule<F, Fut, T>(
    label: &str,
    schedule: &RetrySchedule,
    cancel: &CancellationToken,
    mut operation: F,
) -> Result<T, RetrievalError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, RetrievalError>>,
{
    let mut retry = 0;

    loop {
        if cancel.is_cancelled() {
            return Err(RetrievalError::Cancelled);
        }

        let error = match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        if !error.is_retryable() {
            log::debug!("[{}] terminal failure, not retrying: {}", label, error);
            return Err(error);
        }

        let Some(delay) = schedule.delay_before(retry) else {
            log::debug!(
                "[{}] retry schedule exhausted after {} attempt(s)",
                label,
                retry + 1
            );
            return Err(error);
        };

        retry += 1;
        log::warn!(
            "[{}] attempt {} failed ({}), retrying after {:?}",
            label,
            retry,
            error,
            delay
        );
        cancellable_sleep(delay, cancel).await?;
    }
}
