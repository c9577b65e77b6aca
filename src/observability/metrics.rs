//! Metrics collection and exposition.
//!
//! # Metrics
//! - `redirector_requests_total` (counter): requests by method, status and
//!   matched source (`store`, `yaml`, `json`, `default`)
//! - `redirector_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Metric updates are cheap atomic operations off the response path
//! - The exporter is optional and never part of the HTTP redirect contract

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr` and describe metric families.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            metrics::describe_counter!(
                "redirector_requests_total",
                "Total requests by method, status and matched source"
            );
            metrics::describe_histogram!(
                "redirector_request_duration_seconds",
                "Request latency distribution in seconds"
            );
            tracing::info!(address = %addr, "Prometheus exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install Prometheus exporter");
        }
    }
}

/// Record one completed request.
pub fn record_request(method: &str, status: u16, source: &str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
        ("source", source.to_string()),
    ];
    metrics::counter!("redirector_requests_total", &labels).increment(1);
    metrics::histogram!("redirector_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}
