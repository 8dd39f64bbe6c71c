//! Metrics collection and exposition.
//!
//! # Metrics
//! - `insult_requests_total` (counter): aggregation requests served
//! - `upstream_failures_total` (counter): failed dependency calls, by dependency
//! - `breaker_state` (gauge): 0=closed, 1=half-open, 2=open, by breaker

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::resilience::BreakerState;

/// Install the Prometheus recorder with its scrape endpoint. Must run inside
/// the Tokio runtime. Failure to install leaves metrics as no-ops.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Prometheus exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install Prometheus exporter"),
    }
}

pub fn record_aggregate_request() {
    metrics::counter!("insult_requests_total").increment(1);
}

pub fn record_upstream_failure(dependency: &'static str) {
    metrics::counter!("upstream_failures_total", "dependency" => dependency).increment(1);
}

pub fn record_breaker_state(breaker: &'static str, state: BreakerState) {
    let value = match state {
        BreakerState::Closed => 0.0,
        BreakerState::HalfOpen => 1.0,
        BreakerState::Open => 2.0,
    };
    metrics::gauge!("breaker_state", "breaker" => breaker).set(value);
}
