// src/source/file.rs
//! Local files as text sources.

use super::{SourceId, TextSource};
use crate::error::RetrievalError;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

/// A [`TextSource`] that reads a file from disk. No retries: a missing or
/// unreadable file is reported as-is.
pub struct FileTextSource {
    id: SourceId,
    path: PathBuf,
}

impl FileTextSource {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            id: SourceId::for_path(&path),
            path: PathBuf::from(path),
        }
    }
}

#[async_trait::async_trait]
impl TextSource for FileTextSource {
    fn id(&self) -> &SourceId {
        &self.id
    }

    async fn text(&self, cancel: &CancellationToken) -> Result<String, RetrievalError> {
        log::debug!("Reading [{}]", self.path.display());

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(RetrievalError::Cancelled),
            result = tokio::fs::read_to_string(&self.path) => {
                result.map_err(|e| RetrievalError::Io {
                    path: self.path.display().to_string(),
                    message: e.to_string(),
                })
            }
        }
    }
}
