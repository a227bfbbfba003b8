//! Metrics collection and exposition.
//!
//! # Metrics
//! - `monitor_probes_total` (counter): probes by domain and result (up/down)
//! - `monitor_probe_duration_seconds` (histogram): latency of probes that got a response
//! - `monitor_domain_availability_percent` (gauge): cumulative availability per domain
//! - `monitor_cycles_total` (counter): completed monitoring cycles
//!
//! Without an installed recorder every call here is a no-op, so the engine
//! records unconditionally.

use std::collections::BTreeMap;
use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::health::ProbeResult;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    metrics::describe_counter!("monitor_probes_total", "Probes executed, by domain and result");
    metrics::describe_histogram!(
        "monitor_probe_duration_seconds",
        metrics::Unit::Seconds,
        "Time to response headers for probes that got a response"
    );
    metrics::describe_gauge!(
        "monitor_domain_availability_percent",
        "Cumulative availability percentage per domain"
    );
    metrics::describe_counter!("monitor_cycles_total", "Completed monitoring cycles");

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one probe outcome.
pub fn record_probe(result: &ProbeResult) {
    let outcome = if result.is_up() { "up" } else { "down" };
    metrics::counter!(
        "monitor_probes_total",
        "domain" => result.domain().to_string(),
        "result" => outcome
    )
    .increment(1);

    if result.status_code() != 0 {
        metrics::histogram!(
            "monitor_probe_duration_seconds",
            "domain" => result.domain().to_string()
        )
        .record(result.response_time_ms() / 1000.0);
    }
}

/// Record the availability map produced at the end of a cycle.
pub fn record_cycle(availability: &BTreeMap<String, u8>) {
    metrics::counter!("monitor_cycles_total").increment(1);
    for (domain, percent) in availability {
        metrics::gauge!(
            "monitor_domain_availability_percent",
            "domain" => domain.clone()
        )
        .set(f64::from(*percent));
    }
}
