//! Downstream autoupdate collaborator port.
//!
//! Aggregated search results are handed to the autoupdate service, which
//! filters and expands them according to the caller's permissions. Its
//! response is treated as opaque and forwarded unchanged.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use search_service_shared::SearchResult;

/// Errors from the autoupdate collaborator.
#[derive(Debug, Error)]
pub enum AutoupdateError {
    /// The request to the autoupdate service failed.
    #[error("Autoupdate request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for AutoupdateError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error.to_string())
    }
}

/// Port to the downstream autoupdate service.
#[async_trait]
pub trait AutoupdatePort: Send + Sync {
    /// Hand over the aggregated results; returns the enriched/filtered
    /// payload.
    async fn request(&self, results: &[SearchResult]) -> Result<Value, AutoupdateError>;
}

/// HTTP adapter for the autoupdate service.
pub struct HttpAutoupdate {
    client: reqwest::Client,
    url: String,
}

impl HttpAutoupdate {
    /// Create an adapter posting to `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl AutoupdatePort for HttpAutoupdate {
    async fn request(&self, results: &[SearchResult]) -> Result<Value, AutoupdateError> {
        debug!(url = %self.url, result_count = results.len(), "Requesting autoupdate enrichment");
        let response = self
            .client
            .post(&self.url)
            .query(&[("single", "1")])
            .json(results)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}
