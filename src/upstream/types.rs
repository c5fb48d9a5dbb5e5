//! Upstream wire types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body POSTed to the GraphQL endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamQuery {
    pub query: String,
}

impl UpstreamQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into() }
    }
}

/// Errors that can occur while talking to the upstream endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// Endpoint URL could not be parsed.
    #[error("Invalid upstream endpoint '{0}'")]
    InvalidEndpoint(String),

    /// HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Connection, TLS or I/O failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request did not complete in time.
    #[error("Upstream request timed out")]
    Timeout,

    /// Upstream answered with a 4xx or 5xx status.
    #[error("Upstream returned status {0}")]
    Status(u16),

    /// Upstream answered, but the body is not JSON.
    #[error("Upstream body is not valid JSON: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// True for failures where no answer was obtained at all.
    ///
    /// A `Decode` failure means the upstream did answer, just not with JSON.
    pub fn is_unreachable(&self) -> bool {
        !matches!(self, UpstreamError::Decode(_))
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else if let Some(status) = err.status() {
            UpstreamError::Status(status.as_u16())
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;
