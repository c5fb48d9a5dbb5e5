//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the forwarder.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the forwarder.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ForwarderConfig {
    /// Listener configuration for the HTTP front end.
    pub listener: ListenerConfig,

    /// Upstream GraphQL endpoint and credential.
    pub upstream: UpstreamConfig,

    /// Response contract and front-end behaviour.
    pub forwarder: ContractConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream endpoint configuration.
///
/// Both values normally come from `APPSYNC_API_ENDPOINT_URL` and
/// `APPSYNC_API_KEY`.
#[derive(Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct UpstreamConfig {
    /// GraphQL endpoint queries are POSTed to.
    pub endpoint_url: String,

    /// Static key sent as `x-api-key`.
    pub api_key: String,
}

impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("endpoint_url", &self.endpoint_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// How incomplete requests and malformed upstream payloads are answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseContract {
    /// Every request gets a status and a body (400 / 502 for the edge cases).
    #[default]
    Uniform,
    /// Headers-only response for a missing query; a payload without `data`
    /// fails the invocation.
    Legacy,
}

impl std::str::FromStr for ResponseContract {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" => Ok(Self::Uniform),
            "legacy" => Ok(Self::Legacy),
            other => Err(format!("unknown response contract '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ContractConfig {
    pub contract: ResponseContract,
}

/// Timeout configuration for the HTTP front end.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
