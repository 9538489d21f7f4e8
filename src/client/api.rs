//! HTTP access to the tag service.
//!
//! Calls use the HTTP client's default timeout and are never retried; a
//! failure is reported once and the next poll simply tries again.

use crate::error::{GeotagError, Result};
use crate::wire::{CreateTagResponse, NewTagPayload};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

/// Default tag service URL
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Where the map client reads and writes tags.
#[async_trait]
pub trait TagBackend: Send + Sync + 'static {
    /// Fetches the raw `GET /api/tags` body. Normalization is the caller's job.
    async fn fetch_tags(&self) -> Result<Value>;

    /// Submits one tag.
    async fn upload_tag(&self, payload: &NewTagPayload) -> Result<CreateTagResponse>;
}

/// [`TagBackend`] over the canonical HTTP routes.
#[derive(Debug, Clone)]
pub struct HttpTagBackend {
    client: Client,
    base_url: String,
}

impl HttpTagBackend {
    /// Creates a backend for the default URL
    pub fn new() -> Self {
        Self::with_url(DEFAULT_SERVER_URL)
    }

    /// Creates a backend for a custom URL
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tags_url(&self) -> String {
        format!("{}/api/tags", self.base_url)
    }
}

impl Default for HttpTagBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TagBackend for HttpTagBackend {
    #[instrument(skip(self))]
    async fn fetch_tags(&self) -> Result<Value> {
        let response = self.client.get(self.tags_url()).send().await?;

        if !response.status().is_success() {
            return Err(GeotagError::response(format!(
                "Tag service returned status {} for list",
                response.status()
            )));
        }

        let body: Value = response.json().await?;
        debug!(
            records = body.as_array().map(Vec::len).unwrap_or(0),
            "fetch_tags: received tag list"
        );
        Ok(body)
    }

    #[instrument(skip(self, payload))]
    async fn upload_tag(&self, payload: &NewTagPayload) -> Result<CreateTagResponse> {
        let response = self
            .client
            .post(self.tags_url())
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeotagError::response(format!(
                "Tag service returned status {} for upload",
                response.status()
            )));
        }

        Ok(response.json::<CreateTagResponse>().await?)
    }
}
