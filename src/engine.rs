// src/engine.rs
//! Word counting over a text source, with the cache in front.

use crate::cache::WordCountCache;
use crate::error::RetrievalError;
use crate::source::TextSource;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// The ability to count the words in a piece of text.
pub trait WordCounter: Send + Sync {
    fn count_words(&self, text: &str) -> usize;
}

/// Counts the segments produced by splitting on the space character.
///
/// Only `' '` separates words: consecutive spaces produce empty segments
/// that still count, newlines and tabs do not split, and `""` is one word.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpaceDelimitedCounter;

impl WordCounter for SpaceDelimitedCounter {
    fn count_words(&self, text: &str) -> usize {
        text.split(' ').count()
    }
}

/// Looks a source up in the cache and counts it on a miss.
///
/// The check-fetch-populate sequence is not atomic. Two concurrent misses on
/// the same identity both fetch and both write; the last write wins.
#[derive(Clone)]
pub struct WordCountingEngine {
    counter: Arc<dyn WordCounter>,
    cache: WordCountCache,
}

impl WordCountingEngine {
    pub fn new(cache: WordCountCache) -> Self {
        Self::with_counter(cache, Arc::new(SpaceDelimitedCounter))
    }

    pub fn with_counter(cache: WordCountCache, counter: Arc<dyn WordCounter>) -> Self {
        Self { counter, cache }
    }

    pub fn cache(&self) -> &WordCountCache {
        &self.cache
    }

    /// Returns the word count for `source`, from the cache when possible.
    ///
    /// Retrieval failures are returned exactly as the source produced them.
    pub async fn count_words(
        &self,
        source: &dyn TextSource,
        cancel: &CancellationToken,
    ) -> Result<usize, RetrievalError> {
        let id = source.id();
        log::debug!("Counting words on [{}]", id);

        if let Some(count) = self.cache.try_get(id.as_str()).await {
            return Ok(count);
        }

        let text = source.text(cancel).await?;
        let count = self.counter.count_words(&text);

        self.cache.add(id.as_str(), count).await;

        Ok(count)
    }
}
