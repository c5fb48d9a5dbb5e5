//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the `/graphql` handler
//! - Wire up middleware (tracing, request ID)
//! - Bound each invocation by the request timeout
//! - Bind server to listener
//! - Hand each request to the shared forwarder

use axum::{
    extract::{RawQuery, State},
    http::{HeaderMap, Method},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::Instrument;

use crate::config::ForwarderConfig;
use crate::forwarder::types::UPSTREAM_FAILURE_MESSAGE;
use crate::forwarder::{Forwarder, OutboundResponse};
use crate::http::request::{self, X_REQUEST_ID};
use crate::http::response;
use crate::observability::metrics::{self, Outcome};
use crate::upstream::{AppSyncClient, Upstream, UpstreamResult};

/// Path the forwarder is mounted on.
pub const GRAPHQL_PATH: &str = "/graphql";

/// State shared by all requests.
struct AppState<U> {
    forwarder: Arc<Forwarder<U>>,
    request_timeout: Duration,
}

impl<U> Clone for AppState<U> {
    fn clone(&self) -> Self {
        Self {
            forwarder: Arc::clone(&self.forwarder),
            request_timeout: self.request_timeout,
        }
    }
}

/// HTTP front end for the forwarder.
pub struct HttpServer {
    router: Router,
    config: ForwarderConfig,
}

impl HttpServer {
    /// Create a server around an already constructed forwarder.
    pub fn new<U>(config: ForwarderConfig, forwarder: Forwarder<U>) -> Self
    where
        U: Upstream + 'static,
    {
        let router = Self::build_router(&config, Arc::new(forwarder));
        Self { router, config }
    }

    /// Create a server talking to the configured AppSync endpoint.
    pub fn from_config(config: ForwarderConfig) -> UpstreamResult<Self> {
        let client = AppSyncClient::new(&config.upstream)?;
        let forwarder = Forwarder::new(client, config.forwarder.contract);
        Ok(Self::new(config, forwarder))
    }

    /// Build the Axum router with all middleware layers.
    fn build_router<U>(config: &ForwarderConfig, forwarder: Arc<Forwarder<U>>) -> Router
    where
        U: Upstream + 'static,
    {
        let state = AppState {
            forwarder,
            request_timeout: Duration::from_secs(config.timeouts.request_secs),
        };
        let header = axum::http::HeaderName::from_static(X_REQUEST_ID);
        Router::new()
            .route(GRAPHQL_PATH, get(graphql_handler::<U>))
            .with_state(state)
            .layer(PropagateRequestIdLayer::new(header.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(header, MakeRequestUuid))
    }

    /// Run the server until a shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            contract = ?self.config.forwarder.contract,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get the router, e.g. to drive it without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// `GET /graphql?query=...`
///
/// An invocation running past the request timeout is answered like any
/// other upstream failure, fixed headers included.
async fn graphql_handler<U>(
    State(state): State<AppState<U>>,
    method: Method,
    RawQuery(raw_query): RawQuery,
    headers: HeaderMap,
) -> Response
where
    U: Upstream + 'static,
{
    let request_id = request::request_id(&headers).to_string();
    let inbound = request::inbound_from_query(method.as_str(), raw_query.as_deref());

    let span = tracing::info_span!("forward", request_id = %request_id);
    let invocation = state.forwarder.handle(inbound).instrument(span);
    let Ok(result) = tokio::time::timeout(state.request_timeout, invocation).await else {
        tracing::warn!(
            request_id = %request_id,
            timeout_secs = state.request_timeout.as_secs(),
            "Invocation timed out"
        );
        metrics::record_outcome(Outcome::UpstreamFailure);
        return OutboundResponse::message(500, UPSTREAM_FAILURE_MESSAGE).into_response();
    };

    match result {
        Ok(outbound) => {
            tracing::debug!(request_id = %request_id, status = ?outbound.status_code, "Request forwarded");
            outbound.into_response()
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Invocation failed");
            response::invocation_failure()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResponseContract;
    use crate::upstream::{UpstreamError, UpstreamQuery};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    #[derive(Clone)]
    struct FixedUpstream(Result<Value, UpstreamError>);

    impl Upstream for FixedUpstream {
        async fn execute(&self, _query: &UpstreamQuery) -> UpstreamResult<Value> {
            self.0.clone()
        }
    }

    struct HangingUpstream;

    impl Upstream for HangingUpstream {
        async fn execute(&self, _query: &UpstreamQuery) -> UpstreamResult<Value> {
            std::future::pending().await
        }
    }

    fn server(reply: Result<Value, UpstreamError>, contract: ResponseContract) -> HttpServer {
        HttpServer::new(ForwarderConfig::default(), Forwarder::new(FixedUpstream(reply), contract))
    }

    async fn get(server: &HttpServer, uri: &str) -> (StatusCode, HeaderMap, String) {
        let response = server
            .router()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_forwards_query() {
        let server = server(Ok(json!({"data": {"ping": "pong"}})), ResponseContract::Uniform);
        let (status, headers, body) = get(&server, "/graphql?query=%7Bping%7D").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"ping": "pong"}"#);
        assert_eq!(headers["content-type"], "application/json");
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert!(headers.contains_key(X_REQUEST_ID));
    }

    #[tokio::test]
    async fn test_hung_upstream_times_out_with_500() {
        let mut config = ForwarderConfig::default();
        config.timeouts.request_secs = 1;
        let server = HttpServer::new(config, Forwarder::new(HangingUpstream, ResponseContract::Uniform));

        let (status, headers, body) = get(&server, "/graphql?query=%7Bping%7D").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(headers["content-type"], "application/json");
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert!(headers.contains_key(X_REQUEST_ID));
        assert_eq!(body, r#"{"message": "Something was wrong"}"#);
    }

    #[tokio::test]
    async fn test_missing_query() {
        let uniform = server(Ok(json!({"data": {}})), ResponseContract::Uniform);
        let (status, _, body) = get(&uniform, "/graphql").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"message": "Missing query parameter"}"#);

        let legacy = server(Ok(json!({"data": {}})), ResponseContract::Legacy);
        let (status, headers, body) = get(&legacy, "/graphql?foo=bar").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_legacy_missing_data_fails_invocation() {
        let legacy = server(Ok(json!({"errors": []})), ResponseContract::Legacy);
        let (status, headers, body) = get(&legacy, "/graphql?query=%7Bping%7D").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(headers["content-type"], "application/json");
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let server = server(Err(UpstreamError::Timeout), ResponseContract::Uniform);
        let response = server
            .router()
            .oneshot(
                Request::get("/graphql?query=x")
                    .header(X_REQUEST_ID, "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[X_REQUEST_ID], "req-42");
    }

    #[tokio::test]
    async fn test_only_get_is_routed() {
        let server = server(Ok(json!({"data": {}})), ResponseContract::Uniform);
        let response = server
            .router()
            .oneshot(Request::post("/graphql").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
