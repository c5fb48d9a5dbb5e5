//! Request translation for the HTTP front end.
//!
//! # Responsibilities
//! - Turn the raw query string into `queryStringParameters`
//! - Name the request ID header shared by the middleware and handler
//!
//! # Design Decisions
//! - An empty or missing query string becomes an absent mapping, as a
//!   gateway sends `null` in that case
//! - Repeated keys keep the last value

use std::collections::HashMap;

use axum::http::HeaderMap;

use crate::forwarder::InboundRequest;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Build an [`InboundRequest`] from an HTTP method and raw query string.
pub fn inbound_from_query(method: &str, raw_query: Option<&str>) -> InboundRequest {
    let query_string_parameters = raw_query.filter(|q| !q.is_empty()).map(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .into_owned()
            .collect::<HashMap<String, String>>()
    });

    InboundRequest {
        query_string_parameters,
        http_method: Some(method.to_string()),
    }
}

/// Request ID set by the middleware, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}
