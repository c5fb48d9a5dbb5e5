//! HTTP front end.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, GET /graphql)
//!     → request.rs (query string → InboundRequest, request ID)
//!     → forwarder
//!     → response.rs (OutboundResponse → HTTP response)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{HttpServer, GRAPHQL_PATH};
