//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{ForwarderConfig, ResponseContract};
use crate::config::validation::{validate_config, validate_upstream, ValidationError};

pub const ENV_ENDPOINT_URL: &str = "APPSYNC_API_ENDPOINT_URL";
pub const ENV_API_KEY: &str = "APPSYNC_API_KEY";
pub const ENV_BIND_ADDRESS: &str = "FORWARDER_BIND_ADDRESS";
pub const ENV_CONTRACT: &str = "FORWARDER_CONTRACT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid {var}: {reason}")]
    Env { var: &'static str, reason: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration for the HTTP server.
///
/// Reads the optional TOML file, overlays the process environment and
/// validates the result, listener included.
pub fn load_config(path: Option<&Path>) -> Result<ForwarderConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ForwarderConfig::default(),
    };

    let config = apply_env(config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load configuration for the Lambda entrypoint from the environment alone.
///
/// The Lambda keeps the legacy contract unless `FORWARDER_CONTRACT` says
/// otherwise, so existing API Gateway deployments see the same responses.
pub fn load_from_env() -> Result<ForwarderConfig, ConfigError> {
    let config = lambda_config(|var| std::env::var(var).ok())?;
    validate_upstream(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn lambda_config<F>(lookup: F) -> Result<ForwarderConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = ForwarderConfig::default();
    config.forwarder.contract = ResponseContract::Legacy;
    apply_env(config, lookup)
}

/// Overlay environment values onto `config`.
///
/// `lookup` abstracts the environment so tests need not mutate process state.
pub fn apply_env<F>(mut config: ForwarderConfig, lookup: F) -> Result<ForwarderConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_ENDPOINT_URL) {
        config.upstream.endpoint_url = url;
    }
    if let Some(key) = lookup(ENV_API_KEY) {
        config.upstream.api_key = key;
    }
    if let Some(addr) = lookup(ENV_BIND_ADDRESS) {
        config.listener.bind_address = addr;
    }
    if let Some(contract) = lookup(ENV_CONTRACT) {
        config.forwarder.contract = contract
            .parse()
            .map_err(|reason| ConfigError::Env { var: ENV_CONTRACT, reason })?;
    }
    Ok(config)
}
