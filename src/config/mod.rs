//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → environment overlay (APPSYNC_API_ENDPOINT_URL, APPSYNC_API_KEY, ...)
//!     → validation.rs (semantic checks)
//!     → ForwarderConfig (validated, immutable)
//!     → passed explicitly to the forwarder and front ends
//! ```
//!
//! # Design Decisions
//! - Config is read once at process start and never mutated
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, ConfigError};
pub use schema::ForwarderConfig;
pub use schema::{ListenerConfig, ObservabilityConfig, ResponseContract, TimeoutConfig, UpstreamConfig};
