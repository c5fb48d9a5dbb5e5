//! AWS Lambda front end.
//!
//! The gateway proxy event deserializes straight into an
//! [`InboundRequest`]; the [`OutboundResponse`] serializes into the proxy
//! result object (`statusCode`, `body`, `headers`).

use lambda_runtime::{Error, LambdaEvent};
use tracing::Instrument;

use crate::forwarder::{Forwarder, InboundRequest, OutboundResponse};
use crate::upstream::Upstream;

/// Handle one Lambda invocation.
///
/// A legacy-contract [`ForwardError`](crate::forwarder::ForwardError) is
/// returned as the invocation error, failing the invocation at runtime level.
pub async fn handle_event<U: Upstream>(
    forwarder: &Forwarder<U>,
    event: LambdaEvent<InboundRequest>,
) -> Result<OutboundResponse, Error> {
    let LambdaEvent { payload, context } = event;
    let span = tracing::info_span!("invocation", request_id = %context.request_id);

    let response = forwarder.handle(payload).instrument(span).await?;
    Ok(response)
}
