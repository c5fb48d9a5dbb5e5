//! AppSync query forwarder library.
//!
//! Receives a GET request carrying `?query=...`, POSTs the query to a fixed
//! GraphQL endpoint with a static API key, and relays the `data` field back
//! with JSON and CORS headers.

pub mod config;
pub mod forwarder;
pub mod http;
pub mod lambda;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::schema::ForwarderConfig;
pub use forwarder::Forwarder;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
