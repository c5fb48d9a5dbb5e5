//! Configuration validation.
//!
//! Serde handles the syntax; this checks that the values make sense.
//! All problems are reported at once, not just the first.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ForwarderConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("upstream endpoint URL is not set (APPSYNC_API_ENDPOINT_URL)")]
    MissingEndpoint,

    #[error("upstream endpoint URL '{url}' is invalid: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("upstream API key is not set (APPSYNC_API_KEY)")]
    MissingApiKey,

    #[error("bind address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("metrics address '{0}' is not a valid socket address")]
    InvalidMetricsAddress(String),
}

/// Validate the upstream settings only.
///
/// This is all the Lambda entrypoint needs; it has no listener.
pub fn validate_upstream(config: &ForwarderConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    check_upstream(config, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate the whole configuration, including the HTTP listener.
pub fn validate_config(config: &ForwarderConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    check_upstream(config, &mut errors);

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_upstream(config: &ForwarderConfig, errors: &mut Vec<ValidationError>) {
    let endpoint = config.upstream.endpoint_url.trim();
    if endpoint.is_empty() {
        errors.push(ValidationError::MissingEndpoint);
    } else {
        match Url::parse(endpoint) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => errors.push(ValidationError::InvalidEndpoint {
                url: endpoint.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => errors.push(ValidationError::InvalidEndpoint {
                url: endpoint.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    if config.upstream.api_key.is_empty() {
        errors.push(ValidationError::MissingApiKey);
    }
}
