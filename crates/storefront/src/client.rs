//! Shared HTTP client for the storefront API.
//!
//! All endpoints speak plain JSON over REST. Successful GET responses are
//! cached in-memory via `moka` for a short TTL; failures are never cached,
//! so a manual retry always re-hits the network. Mutating verbs bypass the
//! cache entirely.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};

const CACHE_CAPACITY: u64 = 100;
const CACHE_TTL: Duration = Duration::from_secs(60);

/// Errors that can occur when talking to the storefront API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, protocol).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned a non-success status code.
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the storefront REST API.
///
/// Cheaply cloneable; all clones share one connection pool and one response
/// cache.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    cache: Cache<String, Arc<serde_json::Value>>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    /// Create a new API client with an empty response cache.
    #[must_use]
    pub fn new() -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                cache,
            }),
        }
    }

    /// GET a JSON document, serving from the response cache when possible.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the status is non-success, or
    /// the body is not valid JSON.
    #[instrument(skip(self))]
    pub async fn get_json(&self, url: &str) -> Result<serde_json::Value, ApiError> {
        if let Some(cached) = self.inner.cache.get(url).await {
            debug!("Cache hit");
            return Ok((*cached).clone());
        }

        let value = self.get_json_fresh(url).await?;
        self.inner
            .cache
            .insert(url.to_string(), Arc::new(value.clone()))
            .await;
        Ok(value)
    }

    /// GET a JSON document, always bypassing the response cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the status is non-success, or
    /// the body is not valid JSON.
    #[instrument(skip(self))]
    pub async fn get_json_fresh(&self, url: &str) -> Result<serde_json::Value, ApiError> {
        let response = self.inner.client.get(url).send().await?;
        Self::read_json(response).await
    }

    /// POST a JSON body, returning the parsed response document.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the status is non-success, or
    /// the body is not valid JSON.
    #[instrument(skip(self, body))]
    pub async fn post_json<B: Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<serde_json::Value, ApiError> {
        let response = self.inner.client.post(url).json(body).send().await?;
        Self::read_json(response).await
    }

    /// PATCH a JSON body, returning the parsed response document.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the status is non-success, or
    /// the body is not valid JSON.
    #[instrument(skip(self, body))]
    pub async fn patch_json<B: Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<serde_json::Value, ApiError> {
        let response = self.inner.client.patch(url).json(body).send().await?;
        Self::read_json(response).await
    }

    /// DELETE a resource. The response body, if any, is discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the status is non-success.
    #[instrument(skip(self))]
    pub async fn delete(&self, url: &str) -> Result<(), ApiError> {
        let response = self.inner.client.delete(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "API returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }
        Ok(())
    }

    /// Check the status and parse the body, capturing the raw text for
    /// diagnostics on failure.
    async fn read_json(response: reqwest::Response) -> Result<serde_json::Value, ApiError> {
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "API returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: response_text.chars().take(200).collect(),
            });
        }

        match serde_json::from_str(&response_text) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse API response"
                );
                Err(ApiError::Parse(e))
            }
        }
    }
}
