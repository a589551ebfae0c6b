// src/error.rs
//! Error types for the retrieval-and-count pipeline.
//!
//! Retrieval failures carry enough structure to decide whether a retry is
//! worthwhile. They are `Clone + PartialEq` so the fault a caller finally
//! sees can be compared against the one the fetcher produced.

use thiserror::Error;

/// Failure while producing text from a [`TextSource`](crate::source::TextSource).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RetrievalError {
    /// The server answered with a non-success HTTP status.
    #[error("HTTP status {code} from {url}")]
    Status { code: u16, url: String },

    /// Connection, DNS or protocol failure without an HTTP status.
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The request did not complete within the configured timeout.
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// A local file could not be read.
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// The caller cancelled the operation.
    #[error("Operation cancelled")]
    Cancelled,
}

impl RetrievalError {
    /// Whether this failure is transient and worth retrying.
    ///
    /// Server errors (5xx) and every failure that carries no HTTP status are
    /// retried. Any other status is terminal, and cancellation always is.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Status { code, .. } => (500..=599).contains(code),
            Self::Cancelled => false,
            Self::Transport { .. } | Self::Timeout { .. } | Self::Io { .. } => true,
        }
    }

    /// Whether the failure came from a cancelled token.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Failure while delivering a notification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Notification rejected: {message}")]
    Rejected { message: String },

    #[error("Notification cancelled")]
    Cancelled,
}

/// Anything that can stop a workflow run. Only the workflow sees this type;
/// it never escapes [`WordCountingWorkflow::run`](crate::workflow::WordCountingWorkflow::run).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Invalid command-line or programmatic configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid retry delay '{value}': expected milliseconds")]
    InvalidRetryDelay { value: String },

    #[error("Invalid source '{input}': {reason}")]
    InvalidSource { input: String, reason: String },

    #[error("Invalid notification address: {0}")]
    InvalidAddress(String),
}
