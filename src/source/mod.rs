// src/source/mod.rs
//! Text sources: anything that can produce text for counting.
//!
//! Business logic depends on [`TextSource`], never on HTTP or filesystem
//! details. Web sources retry transient failures; file sources read once.

pub mod extract;
pub mod fetcher;
pub mod file;
pub mod web;

use crate::error::RetrievalError;
use std::fmt;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Stable identity of a text origin. Used as the cache key and as the
/// correlation id in log lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceId(String);

impl SourceId {
    /// Identity for a web origin.
    ///
    /// Parseable URLs are normalized (`HTTP://Test.com` and `http://test.com/`
    /// produce the same id); anything else is used trimmed, as given.
    pub fn for_url(input: &str) -> Self {
        let input = input.trim();
        match Url::parse(input) {
            Ok(url) => Self(url.to_string()),
            Err(_) => Self(input.to_string()),
        }
    }

    /// Identity for a file origin: the path exactly as supplied.
    pub fn for_path(path: &str) -> Self {
        Self(path.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Anything that can provide text for the word counting engine.
///
/// # Laws
///
/// - **L1 (Stable identity)**: `id()` is pure and returns the same value on
///   every call for a given instance.
/// - **L2 (Cancellation)**: once `cancel` fires, `text` fails with
///   [`RetrievalError::Cancelled`] instead of completing its work.
#[async_trait::async_trait]
pub trait TextSource: Send + Sync {
    fn id(&self) -> &SourceId;

    async fn text(&self, cancel: &CancellationToken) -> Result<String, RetrievalError>;
}

pub use extract::{MarkupTextExtractor, TextExtractor};
pub use fetcher::{HttpFetcher, RawFetcher};
pub use file::FileTextSource;
pub use web::{RetryingWebTextSource, WebTextSourceFactory};
