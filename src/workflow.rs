// src/workflow.rs
//! The word counting workflow: count, notify, and never fail the caller.

use crate::constants::{LESS_THAN_THRESHOLD_BODY, MORE_THAN_THRESHOLD_BODY, WORD_COUNT_THRESHOLD};
use crate::engine::WordCountingEngine;
use crate::error::WorkflowError;
use crate::notify::{Notification, NotificationAddresses, Notifier};
use crate::source::TextSource;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// What a single workflow run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowOutcome {
    /// Words counted; 0 when the failure happened before counting finished.
    pub count: usize,
    /// The notification that was delivered, if any.
    pub notification: Option<Notification>,
    /// The failure that was contained, if any.
    pub failure: Option<WorkflowError>,
}

impl WorkflowOutcome {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Picks the notification body for a word count.
pub fn notification_body(count: usize) -> &'static str {
    if count < WORD_COUNT_THRESHOLD {
        LESS_THAN_THRESHOLD_BODY
    } else {
        MORE_THAN_THRESHOLD_BODY
    }
}

/// Counts the words in a source and sends one notification about the result.
///
/// This is the containment boundary of the pipeline: every failure below it
/// is logged here and never propagates. A failure before counting finishes
/// yields a zero count; a failed delivery keeps the computed count.
#[derive(Clone)]
pub struct WordCountingWorkflow {
    engine: WordCountingEngine,
    notifier: Arc<dyn Notifier>,
    addresses: NotificationAddresses,
}

impl WordCountingWorkflow {
    pub fn new(
        engine: WordCountingEngine,
        notifier: Arc<dyn Notifier>,
        addresses: NotificationAddresses,
    ) -> Self {
        Self {
            engine,
            notifier,
            addresses,
        }
    }

    /// Runs the workflow and returns the word count.
    ///
    /// Never fails: a failed run logs one error and returns 0.
    pub async fn run(&self, source: &dyn TextSource, cancel: &CancellationToken) -> usize {
        self.run_detailed(source, cancel).await.count
    }

    /// Runs the workflow and reports what happened.
    pub async fn run_detailed(
        &self,
        source: &dyn TextSource,
        cancel: &CancellationToken,
    ) -> WorkflowOutcome {
        let started = Instant::now();
        let mut count = 0;

        let outcome = match self.count_and_notify(source, cancel, &mut count).await {
            Ok(notification) => WorkflowOutcome {
                count,
                notification: Some(notification),
                failure: None,
            },
            Err(e) => {
                log::error!("Exception in workflow for [{}]: {}", source.id(), e);
                WorkflowOutcome {
                    count,
                    notification: None,
                    failure: Some(e),
                }
            }
        };

        log::debug!(
            "Completed count workflow for [{}] in [{:?}]",
            source.id(),
            started.elapsed()
        );

        outcome
    }

    async fn count_and_notify(
        &self,
        source: &dyn TextSource,
        cancel: &CancellationToken,
        count: &mut usize,
    ) -> Result<Notification, WorkflowError> {
        *count = self.engine.count_words(source, cancel).await?;

        let notification = self.addresses.message(notification_body(*count));
        self.notifier.send(&notification, cancel).await?;

        Ok(notification)
    }
}
