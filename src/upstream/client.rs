//! AppSync GraphQL client.
//!
//! # Responsibilities
//! - POST `{"query": ...}` to the configured endpoint
//! - Attach the static `x-api-key` header
//! - Classify failures (transport, timeout, status, decode)

use std::time::Instant;

use reqwest::header::HeaderValue;
use serde_json::Value;
use url::Url;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::upstream::types::{UpstreamError, UpstreamQuery, UpstreamResult};
use crate::upstream::Upstream;

/// Header carrying the static AppSync credential.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Upstream client backed by a shared `reqwest::Client`.
///
/// Cloning is cheap; all clones share one connection pool.
#[derive(Clone)]
pub struct AppSyncClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: HeaderValue,
}

impl AppSyncClient {
    /// Create a client with its own `reqwest::Client`.
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| UpstreamError::Client(e.to_string()))?;
        Self::with_http_client(http, config)
    }

    /// Create a client on top of an existing `reqwest::Client`.
    pub fn with_http_client(http: reqwest::Client, config: &UpstreamConfig) -> UpstreamResult<Self> {
        let endpoint = Url::parse(config.endpoint_url.trim())
            .map_err(|_| UpstreamError::InvalidEndpoint(config.endpoint_url.clone()))?;

        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| UpstreamError::Client(format!("API key is not a valid header value: {}", e)))?;
        api_key.set_sensitive(true);

        tracing::info!(endpoint = %endpoint, "Upstream client initialized");

        Ok(Self {
            http,
            endpoint,
            api_key,
        })
    }

    async fn post(&self, query: &UpstreamQuery) -> UpstreamResult<Value> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, self.api_key.clone())
            .json(query)
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

impl Upstream for AppSyncClient {
    async fn execute(&self, query: &UpstreamQuery) -> UpstreamResult<Value> {
        let start = Instant::now();
        let result = self.post(query).await;
        metrics::record_upstream_duration(start);

        if let Err(e) = &result {
            tracing::debug!(endpoint = %self.endpoint, error = %e, "Upstream call failed");
        }
        result
    }
}

impl std::fmt::Debug for AppSyncClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppSyncClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}
