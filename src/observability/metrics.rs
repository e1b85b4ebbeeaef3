//! Metrics collection and exposition.
//!
//! # Metrics
//! - `shim_health_checks_total` (counter): probes by verdict
//! - `shim_proxy_requests_total` (counter): forwarded requests by method, status
//! - `shim_upstream_duration_seconds` (histogram): upstream latency by kind
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::health::Verdict;

/// Install the Prometheus exporter with its own HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_health_check(verdict: Verdict, started: Instant) {
    metrics::counter!("shim_health_checks_total", "verdict" => verdict.as_str()).increment(1);
    metrics::histogram!("shim_upstream_duration_seconds", "kind" => "health")
        .record(started.elapsed().as_secs_f64());
}

pub fn record_proxy_request(method: &str, status: u16, started: Instant) {
    metrics::counter!(
        "shim_proxy_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("shim_upstream_duration_seconds", "kind" => "proxy")
        .record(started.elapsed().as_secs_f64());
}
