//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Forwarder, upstream client, HTTP front end produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters, histograms via `metrics`)
//!
//! Consumers:
//!     → stdout / CloudWatch
//!     → Prometheus scrape endpoint (optional, server only)
//! ```
//!
//! # Design Decisions
//! - Request ID is attached to the span of every forwarded request
//! - The upstream API key never reaches a log line

pub mod logging;
pub mod metrics;
