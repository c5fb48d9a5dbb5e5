//! Upstream GraphQL endpoint subsystem.
//!
//! # Data Flow
//! ```text
//! Forwarder
//!     → Upstream::execute (trait seam, test doubles plug in here)
//!     → client.rs (reqwest POST, x-api-key header, JSON body)
//!     → parsed JSON payload back to the forwarder
//! ```
//!
//! # Design Decisions
//! - One long-lived client per process, cloned into every invocation
//! - Exactly one attempt per invocation, no retries
//! - 4xx/5xx answers count as "no result", same as a transport failure

pub mod client;
pub mod types;

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

pub use client::AppSyncClient;
pub use types::{UpstreamError, UpstreamQuery, UpstreamResult};

/// Something that can execute a GraphQL query and hand back the JSON payload.
pub trait Upstream: Send + Sync {
    /// Send `query` upstream and return the decoded response body.
    fn execute(&self, query: &UpstreamQuery) -> impl Future<Output = UpstreamResult<Value>> + Send;
}

impl<U: Upstream> Upstream for Arc<U> {
    fn execute(&self, query: &UpstreamQuery) -> impl Future<Output = UpstreamResult<Value>> + Send {
        (**self).execute(query)
    }
}
