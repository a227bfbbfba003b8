//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (interval, timeout, limits > 0)
//! - Reject methods and header names no request could carry
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MonitorConfig → Result<(), Vec<ValidationError>>
//! - URLs are not checked here; a bad URL probes DOWN at runtime

use reqwest::header::HeaderName;
use reqwest::Method;
use thiserror::Error;

use crate::config::schema::MonitorConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("endpoint #{index} has an empty name")]
    EmptyName { index: usize },

    #[error("endpoint '{name}' has an empty url")]
    EmptyUrl { name: String },

    #[error("endpoint '{name}' has invalid method '{method}'")]
    InvalidMethod { name: String, method: String },

    #[error("endpoint '{name}' has invalid header name '{header}'")]
    InvalidHeader { name: String, header: String },

    #[error("monitor.interval_secs must be greater than zero")]
    ZeroInterval,

    #[error("monitor.history_limit must be greater than zero when set")]
    ZeroHistoryLimit,

    #[error("probe.timeout_ms must be greater than zero")]
    ZeroTimeout,

    #[error("probe.max_concurrency must be greater than zero when set")]
    ZeroConcurrency,
}

/// Check a parsed configuration, collecting every error found.
pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.monitor.interval_secs == 0 {
        errors.push(ValidationError::ZeroInterval);
    }
    if config.monitor.history_limit == Some(0) {
        errors.push(ValidationError::ZeroHistoryLimit);
    }
    if config.probe.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.probe.max_concurrency == Some(0) {
        errors.push(ValidationError::ZeroConcurrency);
    }

    for (index, endpoint) in config.endpoints.iter().enumerate() {
        if endpoint.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName { index });
        }
        if endpoint.url.trim().is_empty() {
            errors.push(ValidationError::EmptyUrl {
                name: endpoint.name.clone(),
            });
        }
        if Method::from_bytes(endpoint.method.as_bytes()).is_err() {
            errors.push(ValidationError::InvalidMethod {
                name: endpoint.name.clone(),
                method: endpoint.method.clone(),
            });
        }
        for header in endpoint.headers.keys() {
            if HeaderName::from_bytes(header.as_bytes()).is_err() {
                errors.push(ValidationError::InvalidHeader {
                    name: endpoint.name.clone(),
                    header: header.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
