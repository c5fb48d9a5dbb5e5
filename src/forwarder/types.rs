//! Request/response envelopes and forwarding errors.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::forwarder::body;
use crate::upstream::UpstreamQuery;

/// Name of the query-string parameter carrying the GraphQL query.
pub const QUERY_PARAMETER: &str = "query";

pub const UPSTREAM_FAILURE_MESSAGE: &str = "Something was wrong";
pub const MISSING_QUERY_MESSAGE: &str = "Missing query parameter";
pub const INVALID_UPSTREAM_MESSAGE: &str = "Invalid upstream response";

/// Inbound request as delivered by the host runtime.
///
/// Only the fields the forwarder reads are modelled; anything else in a
/// gateway event is ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundRequest {
    /// Absent and `null` both deserialize to `None`.
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,
}

impl InboundRequest {
    /// Request carrying the given parameters.
    pub fn with_parameters<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            query_string_parameters: Some(
                params.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            ),
            http_method: None,
        }
    }

    /// Extract the query to forward, if the request carries one.
    pub fn upstream_query(&self) -> Option<UpstreamQuery> {
        self.query_string_parameters
            .as_ref()?
            .get(QUERY_PARAMETER)
            .map(|q| UpstreamQuery::new(q.as_str()))
    }

    pub fn method(&self) -> &str {
        self.http_method.as_deref().unwrap_or("GET")
    }
}

/// Response envelope returned to the caller.
///
/// `headers` always holds the fixed content-type and CORS pair; every
/// constructor goes through [`fixed_headers`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    pub headers: BTreeMap<String, String>,
}

/// Headers attached to every response.
pub fn fixed_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
    ])
}

impl OutboundResponse {
    /// Response with only the fixed headers and neither status nor body.
    pub fn headers_only() -> Self {
        Self {
            status_code: None,
            body: None,
            headers: fixed_headers(),
        }
    }

    /// Response whose body is the encoding of `value`.
    pub fn json(status: u16, value: &Value) -> Self {
        Self {
            status_code: Some(status),
            body: Some(body::encode(value)),
            headers: fixed_headers(),
        }
    }

    /// Response whose body is `{"message": message}`.
    pub fn message(status: u16, message: &str) -> Self {
        Self::json(status, &json!({ "message": message }))
    }
}

/// Errors that escape the forwarder under the legacy contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForwardError {
    /// Upstream JSON has no `data` key, or is not an object at all.
    #[error("Upstream response has no 'data' field")]
    MissingDataField,

    /// Upstream body could not be parsed as JSON.
    #[error("Malformed upstream response: {0}")]
    MalformedUpstream(String),
}

/// Result type for forwarding operations.
pub type ForwardResult<T> = Result<T, ForwardError>;
