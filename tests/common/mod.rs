// tests/common/mod.rs
//! Shared fixtures for integration tests: a scripted fetcher, a recording
//! notifier, and a logger that captures records per test thread.

#![allow(dead_code)]

use log::{Level, Log, Metadata, Record};
use parking_lot::Mutex;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;
use wordtally::{
    CancellationToken, DeliveryError, MarkupTextExtractor, Notification, NotificationAddresses,
    Notifier, RawFetcher, RetrievalError, RetrySchedule, RetryingWebTextSource, Sleeper,
    WebTextSourceFactory, WordCountCache, WordCountingEngine, WordCountingWorkflow,
};

pub const FAKE_URL: &str = "http://test.com";

// ---------------------------------------------------------------------------
// Log capture
// ---------------------------------------------------------------------------

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target().starts_with("wordtally")
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = record.args().to_string();
            RECORDS.with(|r| r.borrow_mut().push((record.level(), message)));
        }
    }

    fn flush(&self) {}
}

static CAPTURE: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// Installs the capturing logger and clears this thread's records.
///
/// Records are kept per thread, so only use this from current-thread
/// `#[tokio::test]`s.
pub fn capture_logs() {
    INIT.call_once(|| {
        log::set_logger(&CAPTURE).expect("no other logger is installed in tests");
        log::set_max_level(log::LevelFilter::Trace);
    });
    RECORDS.with(|r| r.borrow_mut().clear());
}

/// Messages logged on this thread at `level` since [`capture_logs`].
pub fn logged(level: Level) -> Vec<String> {
    RECORDS.with(|r| {
        r.borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    })
}

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// Fetcher that replays scripted results; the last one repeats forever.
pub struct ScriptedFetcher {
    script: Mutex<VecDeque<Result<String, RetrievalError>>>,
    calls: AtomicUsize,
}

impl ScriptedFetcher {
    pub fn new(script: Vec<Result<String, RetrievalError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn with_html(html: impl Into<String>) -> Arc<Self> {
        Self::new(vec![Ok(html.into())])
    }

    pub fn failing_with_status(code: u16) -> Arc<Self> {
        Self::new(vec![Err(status_error(code))])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl RawFetcher for ScriptedFetcher {
    async fn fetch_raw(
        &self,
        _url: &str,
        cancel: &CancellationToken,
    ) -> Result<String, RetrievalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if cancel.is_cancelled() {
            return Err(RetrievalError::Cancelled);
        }
        let mut script = self.script.lock();
        let next = if script.len() > 1 {
            script.pop_front()
        } else {
            script.front().cloned()
        };
        next.unwrap_or_else(|| Ok(String::new()))
    }
}

/// Notifier that records everything it is asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn bodies(&self) -> Vec<String> {
        self.sent.lock().iter().map(|n| n.body.clone()).collect()
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn send(
        &self,
        notification: &Notification,
        _cancel: &CancellationToken,
    ) -> Result<(), DeliveryError> {
        self.sent.lock().push(notification.clone());
        Ok(())
    }
}

/// Sleeper that returns immediately and counts how often it was asked to wait.
#[derive(Default)]
pub struct CountingSleeper {
    calls: AtomicUsize,
}

impl CountingSleeper {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Sleeper for CountingSleeper {
    async fn sleep(&self, _duration: Duration) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn status_error(code: u16) -> RetrievalError {
    RetrievalError::Status {
        code,
        url: FAKE_URL.to_string(),
    }
}

pub fn zero_schedule(retries: usize) -> RetrySchedule {
    RetrySchedule::new(vec![Duration::ZERO; retries])
}

pub fn instant_cache() -> WordCountCache {
    WordCountCache::with_sleeper(Duration::from_secs(3), Arc::new(CountingSleeper::default()))
}

pub fn web_source(fetcher: Arc<ScriptedFetcher>, schedule: RetrySchedule) -> RetryingWebTextSource {
    WebTextSourceFactory::new(fetcher, Arc::new(MarkupTextExtractor), schedule).create(FAKE_URL)
}

pub fn workflow(cache: WordCountCache, notifier: Arc<RecordingNotifier>) -> WordCountingWorkflow {
    WordCountingWorkflow::new(
        WordCountingEngine::new(cache),
        notifier,
        NotificationAddresses::default(),
    )
}

/// HTML whose extracted text has exactly `words` space-separated words.
pub fn html_with_words(words: usize) -> String {
    format!("<html><body><p>{}</p></body></html>", vec!["word"; words].join(" "))
}
