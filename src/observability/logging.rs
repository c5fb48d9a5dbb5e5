//! Structured logging.
//!
//! `RUST_LOG` takes precedence; otherwise the configured level applies to
//! this crate and to `tower_http`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("appsync_forwarder={level},tower_http={level}").into())
}

/// Initialize logging for the HTTP server.
pub fn init(level: &str) {
    tracing_subscriber::registry()
        .with(filter(level))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize logging inside the Lambda runtime.
///
/// CloudWatch timestamps every line and does not render ANSI colours.
pub fn init_for_lambda(level: &str) {
    tracing_subscriber::registry()
        .with(filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .without_time()
                .with_target(false),
        )
        .init();
}
