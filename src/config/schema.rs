//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the monitor.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the endpoint monitor.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    /// Cycle scheduling and history retention.
    pub monitor: ScheduleConfig,

    /// Probe settings shared by every endpoint.
    pub probe: ProbeConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Endpoints to monitor, in configuration order.
    pub endpoints: Vec<EndpointConfig>,
}

/// Cycle scheduling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Pause between the end of one cycle and the start of the next.
    pub interval_secs: u64,

    /// Maximum probe results retained per domain. Availability stays
    /// cumulative regardless of this limit.
    pub history_limit: Option<usize>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_secs: 15,
            history_limit: None,
        }
    }
}

/// Probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,

    /// Maximum probes in flight per cycle (unbounded when unset).
    pub max_concurrency: Option<usize>,

    /// User-Agent sent when an endpoint does not override it.
    pub user_agent: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5_000,
            max_concurrency: None,
            user_agent: concat!("endpoint-monitor/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9464".to_string(),
        }
    }
}

/// A single monitored endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointConfig {
    /// Label used in logs and reports.
    pub name: String,

    /// Absolute URL to request.
    pub url: String,

    /// HTTP method (default: GET).
    #[serde(default = "default_method")]
    pub method: String,

    /// Extra request headers.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Request body, sent verbatim.
    #[serde(default)]
    pub body: Option<String>,
}

fn default_method() -> String {
    "GET".to_string()
}
