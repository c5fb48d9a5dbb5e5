//! Lambda entrypoint for the AppSync forwarder.
//!
//! Configuration comes from `APPSYNC_API_ENDPOINT_URL` and `APPSYNC_API_KEY`
//! (plus the optional `FORWARDER_CONTRACT`), read once at cold start. The
//! contract defaults to `legacy` here: a request without `query` gets a
//! headers-only object and an upstream answer without `data` fails the
//! invocation. Set `FORWARDER_CONTRACT=uniform` for 400/502 responses.

use std::sync::Arc;

use appsync_forwarder::config;
use appsync_forwarder::forwarder::{Forwarder, InboundRequest};
use appsync_forwarder::lambda::handle_event;
use appsync_forwarder::observability::logging;
use appsync_forwarder::upstream::AppSyncClient;
use lambda_runtime::{service_fn, Error, LambdaEvent};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = config::load_from_env()?;
    logging::init_for_lambda(&config.observability.log_level);

    let client = AppSyncClient::new(&config.upstream)?;
    let forwarder = Arc::new(Forwarder::new(client, config.forwarder.contract));

    tracing::info!(contract = ?forwarder.contract(), "Lambda forwarder ready");

    lambda_runtime::run(service_fn(move |event: LambdaEvent<InboundRequest>| {
        let forwarder = Arc::clone(&forwarder);
        async move { handle_event(&*forwarder, event).await }
    }))
    .await
}
