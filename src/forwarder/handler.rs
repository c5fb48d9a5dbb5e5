//! The forwarding procedure.
//!
//! One invocation: pull `query` out of the request, POST it upstream once,
//! and turn whatever came back into an [`OutboundResponse`].

use serde_json::Value;

use crate::config::ResponseContract;
use crate::forwarder::types::{
    ForwardError, ForwardResult, InboundRequest, OutboundResponse, INVALID_UPSTREAM_MESSAGE,
    MISSING_QUERY_MESSAGE, UPSTREAM_FAILURE_MESSAGE,
};
use crate::observability::metrics::{self, Outcome};
use crate::upstream::Upstream;

/// Stateless forwarder over an injected upstream.
#[derive(Debug, Clone)]
pub struct Forwarder<U> {
    upstream: U,
    contract: ResponseContract,
}

impl<U: Upstream> Forwarder<U> {
    pub fn new(upstream: U, contract: ResponseContract) -> Self {
        Self { upstream, contract }
    }

    pub fn contract(&self) -> ResponseContract {
        self.contract
    }

    /// Handle one inbound request.
    ///
    /// Always yields a response carrying the fixed headers, except under
    /// [`ResponseContract::Legacy`] when the upstream answers without a
    /// usable `data` field; that case is returned as an error so the host
    /// runtime fails the invocation.
    pub async fn handle(&self, request: InboundRequest) -> ForwardResult<OutboundResponse> {
        let Some(query) = request.upstream_query() else {
            tracing::debug!(
                method = request.method(),
                has_parameters = request.query_string_parameters.is_some(),
                "No query parameter, nothing forwarded"
            );
            metrics::record_outcome(Outcome::MissingQuery);
            return Ok(match self.contract {
                ResponseContract::Legacy => OutboundResponse::headers_only(),
                ResponseContract::Uniform => OutboundResponse::message(400, MISSING_QUERY_MESSAGE),
            });
        };

        match self.upstream.execute(&query).await {
            Ok(payload) => match extract_data(payload) {
                Ok(data) => {
                    metrics::record_outcome(Outcome::Ok);
                    Ok(OutboundResponse::json(200, &data))
                }
                Err(e) => self.reject_upstream(e),
            },
            Err(e) if e.is_unreachable() => {
                tracing::warn!(error = %e, "Error in request to upstream endpoint");
                metrics::record_outcome(Outcome::UpstreamFailure);
                Ok(OutboundResponse::message(500, UPSTREAM_FAILURE_MESSAGE))
            }
            Err(e) => self.reject_upstream(ForwardError::MalformedUpstream(e.to_string())),
        }
    }

    fn reject_upstream(&self, err: ForwardError) -> ForwardResult<OutboundResponse> {
        tracing::error!(error = %err, contract = ?self.contract, "Unusable upstream response");
        metrics::record_outcome(Outcome::BadUpstream);
        match self.contract {
            ResponseContract::Legacy => Err(err),
            ResponseContract::Uniform => Ok(OutboundResponse::message(502, INVALID_UPSTREAM_MESSAGE)),
        }
    }
}

/// Take the `data` member out of an upstream payload.
///
/// A present `data: null` is kept; only a missing key is an error.
fn extract_data(payload: Value) -> ForwardResult<Value> {
    match payload {
        Value::Object(mut map) => map.remove("data").ok_or(ForwardError::MissingDataField),
        _ => Err(ForwardError::MissingDataField),
    }
}
