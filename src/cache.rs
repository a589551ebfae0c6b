// src/cache.rs
//! In-memory word count cache, keyed by source identity.
//!
//! The cache warms up lazily: the first lookup or insert pays a one-time
//! start-up cost and every later call skips it. Handles are cheap clones of
//! one shared store, so the process constructs the cache once and hands a
//! clone to every consumer.

use crate::constants::DEFAULT_CACHE_WARM_UP;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

/// The ability to wait. Injected so the warm-up can be skipped or counted.
#[async_trait::async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// [`Sleeper`] on the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait::async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

struct CacheStore {
    entries: DashMap<String, usize>,
    initialized: OnceCell<()>,
    warm_up: Duration,
    sleeper: Arc<dyn Sleeper>,
}

/// Cache-aside store for word counts.
///
/// No eviction and no expiry: entries live as long as the store. Concurrent
/// first use runs the warm-up once; other callers wait for it to finish
/// before touching the table.
#[derive(Clone)]
pub struct WordCountCache {
    store: Arc<CacheStore>,
}

impl WordCountCache {
    pub fn new(warm_up: Duration) -> Self {
        Self::with_sleeper(warm_up, Arc::new(TokioSleeper))
    }

    pub fn with_sleeper(warm_up: Duration, sleeper: Arc<dyn Sleeper>) -> Self {
        Self {
            store: Arc::new(CacheStore {
                entries: DashMap::new(),
                initialized: OnceCell::new(),
                warm_up,
                sleeper,
            }),
        }
    }

    /// Looks up `key`, warming the cache first if needed.
    pub async fn try_get(&self, key: &str) -> Option<usize> {
        self.ensure_initialized().await;

        let hit = self.store.entries.get(key).map(|entry| *entry.value());
        if hit.is_some() {
            log::info!("Cache Hit: {}", key);
        } else {
            log::info!("Cache Miss: {}", key);
        }
        hit
    }

    /// Inserts or overwrites `key`, warming the cache first if needed.
    pub async fn add(&self, key: &str, value: usize) {
        self.ensure_initialized().await;
        self.store.entries.insert(key.to_string(), value);
    }

    pub fn len(&self) -> usize {
        self.store.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.entries.is_empty()
    }

    pub fn is_initialized(&self) -> bool {
        self.store.initialized.initialized()
    }

    async fn ensure_initialized(&self) {
        let store = &self.store;
        store
            .initialized
            .get_or_init(|| async {
                log::warn!("Initializing Cache");
                store.sleeper.sleep(store.warm_up).await;
            })
            .await;
    }
}

impl Default for WordCountCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_WARM_UP)
    }
}
