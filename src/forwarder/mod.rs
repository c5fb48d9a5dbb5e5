//! Forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! InboundRequest (host runtime event or HTTP query string)
//!     → handler.rs (extract `query`, call upstream once)
//!     → upstream (POST {"query": ...} with x-api-key)
//!     → handler.rs (pick `data`, or map the failure)
//!     → body.rs (encode JSON body)
//!     → OutboundResponse (status, body, fixed headers)
//! ```
//!
//! # Design Decisions
//! - No state between invocations; the forwarder only holds the upstream
//!   handle and the response contract
//! - Upstream failures never reach the caller in raw form

pub mod body;
pub mod handler;
pub mod types;

pub use handler::Forwarder;
pub use types::{fixed_headers, ForwardError, ForwardResult, InboundRequest, OutboundResponse};
