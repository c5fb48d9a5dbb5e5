//! AppSync query forwarder (HTTP server)
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────┐
//!                       │                 FORWARDER                    │
//!                       │                                              │
//!   GET /graphql?query= │  ┌─────────┐    ┌───────────┐    ┌────────┐  │   POST {"query": ...}
//!   ────────────────────┼─▶│  http   │───▶│ forwarder │───▶│upstream│──┼──────────────────────▶ AppSync
//!                       │  │ server  │    │  handler  │    │ client │  │   x-api-key
//!   ◀───────────────────┼──│         │◀───│           │◀───│        │◀─┼──────────────────────
//!   status, body, CORS  │  └─────────┘    └───────────┘    └────────┘  │   {"data": ...}
//!                       │                                              │
//!                       │  config · observability · lifecycle          │
//!                       └──────────────────────────────────────────────┘
//! ```
//!
//! The same forwarder also runs inside AWS Lambda, see `src/bin/lambda.rs`.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use appsync_forwarder::config;
use appsync_forwarder::observability::{logging, metrics};
use appsync_forwarder::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "appsync-forwarder")]
#[command(about = "Forward GET ?query= requests to an AppSync GraphQL endpoint", long_about = None)]
struct Cli {
    /// Optional TOML config file; environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Config is loaded before logging so its log level applies.
    let config = config::load_config(cli.config.as_deref())?;
    logging::init(&config.observability.log_level);

    tracing::info!("appsync-forwarder v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = ?config.upstream,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::from_config(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
