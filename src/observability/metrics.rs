//! Metrics collection and exposition.
//!
//! # Metrics
//! - `forwarder_requests_total` (counter): handled invocations by outcome
//! - `forwarder_upstream_duration_seconds` (histogram): upstream call latency
//!
//! Recording goes through the `metrics` facade and is a no-op until an
//! exporter is installed, so the Lambda entrypoint and tests pay nothing.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// How a single invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Upstream data relayed with 200.
    Ok,
    /// Upstream unreachable or answered with an error status.
    UpstreamFailure,
    /// No `query` parameter in the request.
    MissingQuery,
    /// Upstream answered without a usable `data` field.
    BadUpstream,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Ok => "ok",
            Outcome::UpstreamFailure => "upstream_failure",
            Outcome::MissingQuery => "missing_query",
            Outcome::BadUpstream => "bad_upstream",
        }
    }
}

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Count one handled invocation.
pub fn record_outcome(outcome: Outcome) {
    metrics::counter!("forwarder_requests_total", "outcome" => outcome.as_str()).increment(1);
}

/// Record how long the upstream call took.
pub fn record_upstream_duration(start: Instant) {
    metrics::histogram!("forwarder_upstream_duration_seconds").record(start.elapsed().as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_labels() {
        assert_eq!(Outcome::Ok.as_str(), "ok");
        assert_eq!(Outcome::UpstreamFailure.as_str(), "upstream_failure");
        assert_eq!(Outcome::MissingQuery.as_str(), "missing_query");
        assert_eq!(Outcome::BadUpstream.as_str(), "bad_upstream");
    }

    #[test]
    fn test_recording_without_exporter() {
        record_outcome(Outcome::Ok);
        record_upstream_duration(Instant::now());
    }
}
