// src/lib.rs
//! wordtally library: resilient retrieval, word counting, caching and notification.
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `RetrievalError`, `DeliveryError`, `WorkflowError`, `ConfigError`
//! - **Configuration**: `CommandLineInput`, `WorkflowConfig`, `SourceSpec`
//! - **Text sources**: `TextSource`, `RetryingWebTextSource`, `FileTextSource`
//! - **Retry**: `RetrySchedule`, `retry_with_schedule`
//! - **Counting**: `WordCountCache`, `WordCountingEngine`, `WordCounter`
//! - **Workflow**: `WordCountingWorkflow`, `Notifier`

pub mod cache;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod notify;
pub mod retry;
pub mod source;
pub mod workflow;

// --- Error Handling ---
pub use crate::error::{ConfigError, DeliveryError, RetrievalError, WorkflowError};

// --- Configuration ---
pub use crate::config::{parse_retry_delays, CommandLineInput, SourceSpec, WorkflowConfig};

// --- Text Sources ---
pub use crate::source::{
    FileTextSource, HttpFetcher, MarkupTextExtractor, RawFetcher, RetryingWebTextSource,
    SourceId, TextExtractor, TextSource, WebTextSourceFactory,
};

// --- Retry ---
pub use crate::retry::{cancellable_sleep, retry_with_schedule, RetrySchedule};

// --- Counting ---
pub use crate::cache::{Sleeper, TokioSleeper, WordCountCache};
pub use crate::engine::{SpaceDelimitedCounter, WordCounter, WordCountingEngine};

// --- Workflow ---
pub use crate::notify::{LogNotifier, Notification, NotificationAddresses, Notifier};
pub use crate::workflow::{notification_body, WordCountingWorkflow, WorkflowOutcome};

pub use tokio_util::sync::CancellationToken;
