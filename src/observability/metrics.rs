//! Metrics collection and exposition.
//!
//! # Metrics
//! - `heroes_proxy_requests_total` (counter): inbound requests by method, route, status
//! - `heroes_proxy_request_duration_seconds` (histogram): inbound latency
//! - `heroes_proxy_upstream_requests_total` (counter): upstream calls by method, outcome
//! - `heroes_proxy_upstream_duration_seconds` (histogram): upstream latency
//!
//! Without an installed recorder every helper is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on `addr`. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one inbound request.
pub fn record_request(method: &str, route: &str, status: u16, start_time: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    counter!("heroes_proxy_requests_total", &labels).increment(1);
    histogram!("heroes_proxy_request_duration_seconds", &labels)
        .record(start_time.elapsed().as_secs_f64());
}

/// Record one upstream call. `status` is `None` for transport faults.
pub fn record_upstream_call(method: &str, status: Option<u16>, start_time: Instant) {
    let outcome = match status {
        Some(code) => code.to_string(),
        None => "transport_error".to_string(),
    };
    let labels = [("method", method.to_string()), ("outcome", outcome)];
    counter!("heroes_proxy_upstream_requests_total", &labels).increment(1);
    histogram!("heroes_proxy_upstream_duration_seconds", &labels)
        .record(start_time.elapsed().as_secs_f64());
}
