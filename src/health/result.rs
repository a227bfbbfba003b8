//! Probe outcome and UP/DOWN classification.

use std::time::{Duration, SystemTime};

use crate::health::endpoint::EndpointDescriptor;

/// Probes slower than this are DOWN regardless of status.
pub const LATENCY_THRESHOLD_MS: f64 = 500.0;

/// Outcome of one probe attempt.
///
/// A result either carries a real status with a finite latency, or the
/// "no response" sentinel: status `0` with infinite latency.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    endpoint_name: String,
    domain: String,
    response_time_ms: f64,
    status_code: u16,
    timestamp: SystemTime,
}

impl ProbeResult {
    /// A probe that received response headers.
    pub fn responded(endpoint: &EndpointDescriptor, status_code: u16, elapsed: Duration) -> Self {
        debug_assert!(status_code != 0, "a received response always has a status");
        Self {
            endpoint_name: endpoint.name().to_string(),
            domain: endpoint.domain().to_string(),
            response_time_ms: elapsed.as_secs_f64() * 1000.0,
            status_code,
            timestamp: SystemTime::now(),
        }
    }

    /// A probe that obtained no response at all.
    pub fn failed(endpoint: &EndpointDescriptor) -> Self {
        Self {
            endpoint_name: endpoint.name().to_string(),
            domain: endpoint.domain().to_string(),
            response_time_ms: f64::INFINITY,
            status_code: 0,
            timestamp: SystemTime::now(),
        }
    }

    pub fn endpoint_name(&self) -> &str {
        &self.endpoint_name
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn response_time_ms(&self) -> f64 {
        self.response_time_ms
    }

    /// HTTP status, or `0` when no response was obtained.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    /// 2xx status and under the latency threshold.
    pub fn is_up(&self) -> bool {
        (200..300).contains(&self.status_code) && self.response_time_ms < LATENCY_THRESHOLD_MS
    }
}
