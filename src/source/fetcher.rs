// src/source/fetcher.rs
//! Raw content retrieval over HTTP.
//!
//! This module is a thin wrapper around reqwest. It reports failures with
//! enough structure for the retry policy to tell a status-bearing error
//! from a transport fault, and it does no parsing of its own.

use crate::constants::{DEFAULT_REQUEST_TIMEOUT, USER_AGENT};
use crate::error::RetrievalError;
use reqwest::Client;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// The ability to download raw content from a URL.
#[async_trait::async_trait]
pub trait RawFetcher: Send + Sync {
    async fn fetch_raw(&self, url: &str, cancel: &CancellationToken)
        -> Result<String, RetrievalError>;
}

/// [`RawFetcher`] backed by a shared reqwest client.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with the default request timeout.
    pub fn new() -> Result<Self, RetrievalError> {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, RetrievalError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RetrievalError::Transport {
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }

    async fn get_text(&self, url: &str) -> Result<String, RetrievalError> {
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_reqwest_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            log::debug!("GET {} returned {}", url, status);
            return Err(RetrievalError::Status {
                code: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.text().await.map_err(|e| map_reqwest_error(url, e))
    }
}

#[async_trait::async_trait]
impl RawFetcher for HttpFetcher {
    async fn fetch_raw(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<String, RetrievalError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(RetrievalError::Cancelled),
            result = self.get_text(url) => result,
        }
    }
}

/// Maps a reqwest failure onto the retrieval vocabulary.
fn map_reqwest_error(url: &str, err: reqwest::Error) -> RetrievalError {
    if err.is_timeout() {
        return RetrievalError::Timeout {
            url: url.to_string(),
        };
    }
    if let Some(status) = err.status() {
        return RetrievalError::Status {
            code: status.as_u16(),
            url: url.to_string(),
        };
    }
    RetrievalError::Transport {
        message: err.to_string(),
    }
}
