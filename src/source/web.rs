// src/source/web.rs
//! Web pages as text sources, with retries on transient failures.

use super::{RawFetcher, SourceId, TextExtractor, TextSource};
use crate::error::RetrievalError;
use crate::retry::{retry_with_schedule, RetrySchedule};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// A [`TextSource`] that downloads a URL, retrying transient failures on a
/// fixed schedule, and extracts plain text from the markup.
///
/// Build these through [`WebTextSourceFactory`] so every source shares one
/// fetcher and one schedule.
pub struct RetryingWebTextSource {
    id: SourceId,
    url: String,
    fetcher: Arc<dyn RawFetcher>,
    extractor: Arc<dyn TextExtractor>,
    schedule: RetrySchedule,
}

impl RetryingWebTextSource {
    pub fn new(
        url: impl Into<String>,
        fetcher: Arc<dyn RawFetcher>,
        extractor: Arc<dyn TextExtractor>,
        schedule: RetrySchedule,
    ) -> Self {
        let url = url.into();
        Self {
            id: SourceId::for_url(&url),
            url,
            fetcher,
            extractor,
            schedule,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn schedule(&self) -> &RetrySchedule {
        &self.schedule
    }
}

#[async_trait::async_trait]
impl TextSource for RetryingWebTextSource {
    fn id(&self) -> &SourceId {
        &self.id
    }

    async fn text(&self, cancel: &CancellationToken) -> Result<String, RetrievalError> {
        log::debug!("Downloading [{}]", self.url);

        let raw = retry_with_schedule(self.id.as_str(), &self.schedule, cancel, || {
            self.fetcher.fetch_raw(&self.url, cancel)
        })
        .await?;

        Ok(self.extractor.extract_plain_text(&raw))
    }
}

/// Builds [`RetryingWebTextSource`]s that share a fetcher, an extractor and
/// a retry schedule.
#[derive(Clone)]
pub struct WebTextSourceFactory {
    fetcher: Arc<dyn RawFetcher>,
    extractor: Arc<dyn TextExtractor>,
    schedule: RetrySchedule,
}

impl WebTextSourceFactory {
    pub fn new(
        fetcher: Arc<dyn RawFetcher>,
        extractor: Arc<dyn TextExtractor>,
        schedule: RetrySchedule,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            schedule,
        }
    }

    pub fn create(&self, url: impl Into<String>) -> RetryingWebTextSource {
        RetryingWebTextSource::new(
            url,
            Arc::clone(&self.fetcher),
            Arc::clone(&self.extractor),
            self.schedule.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MarkupTextExtractor;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Fetcher that replays scripted results; the last one repeats forever.
    struct ScriptedFetcher {
        script: Mutex<VecDeque<Result<String, RetrievalError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedFetcher {
        fn new(script: Vec<Result<String, RetrievalError>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl RawFetcher for ScriptedFetcher {
        async fn fetch_raw(
            &self,
            _url: &str,
            _cancel: &CancellationToken,
        ) -> Result<String, RetrievalError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut script = self.script.lock();
            if script.len() > 1 {
                script.pop_front().unwrap()
            } else {
                script.front().cloned().unwrap()
            }
        }
    }

    fn source(fetcher: Arc<ScriptedFetcher>, retries: usize) -> RetryingWebTextSource {
        WebTextSourceFactory::new(
            fetcher,
            Arc::new(MarkupTextExtractor),
            RetrySchedule::new(vec![Duration::ZERO; retries]),
        )
        .create("http://testing.com")
    }

    fn status(code: u16) -> RetrievalError {
        RetrievalError::Status {
            code,
            url: "http://testing.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_retry_policy_per_error_kind() {
        let cases = [
            (
                RetrievalError::Transport {
                    message: "general failure should be retried".to_string(),
                },
                true,
            ),
            (status(500), true),
            (status(404), false),
        ];

        for (error, expect_retry) in cases {
            let fetcher = ScriptedFetcher::new(vec![Err(error.clone())]);
            let result = source(Arc::clone(&fetcher), 3)
                .text(&CancellationToken::new())
                .await;

            assert_eq!(result, Err(error));
            assert_eq!(fetcher.calls(), if expect_retry { 4 } else { 1 });
        }
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failure() {
        let fetcher = ScriptedFetcher::new(vec![
            Err(status(500)),
            Ok("<p>two words</p>".to_string()),
        ]);

        let text = source(Arc::clone(&fetcher), 3)
            .text(&CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(text, "two words");
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_schedule_fails_on_first_transient_error() {
        let fetcher = ScriptedFetcher::new(vec![Err(status(503))]);
        let result = source(Arc::clone(&fetcher), 0)
            .text(&CancellationToken::new())
            .await;

        assert_eq!(result, Err(status(503)));
        assert_eq!(fetcher.calls(), 1);
    }

    #[test]
    fn test_factory_shares_schedule_and_normalizes_identity() {
        let factory = WebTextSourceFactory::new(
            ScriptedFetcher::new(vec![Ok(String::new())]),
            Arc::new(MarkupTextExtractor),
            RetrySchedule::default(),
        );
        let a = factory.create("http://Testing.com");
        let b = factory.create("http://testing.com/");

        assert_eq!(a.id(), b.id());
        assert_eq!(a.schedule(), b.schedule());
        assert_eq!(a.url(), "http://Testing.com");
    }
}
