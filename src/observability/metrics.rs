//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): relayed requests by outcome, status
//! - `relay_request_duration_seconds` (histogram): handler latency
//! - `relay_upstream_bytes_total` (counter): bytes buffered from upstreams
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its HTTP scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    describe_counter!("relay_requests_total", "Relayed image requests");
    describe_histogram!(
        "relay_request_duration_seconds",
        Unit::Seconds,
        "Time spent handling a relay request"
    );
    describe_counter!(
        "relay_upstream_bytes_total",
        Unit::Bytes,
        "Bytes buffered from upstream image hosts"
    );

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(outcome: &'static str, status: u16, start: Instant) {
    counter!("relay_requests_total", "outcome" => outcome, "status" => status.to_string())
        .increment(1);
    histogram!("relay_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_upstream_bytes(bytes: u64) {
    counter!("relay_upstream_bytes_total").increment(bytes);
}
