//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{EndpointConfig, MonitorConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a configuration file without validating it.
///
/// `.yaml` and `.yml` files are read as YAML, everything else as TOML.
pub fn read_config(path: &Path) -> Result<MonitorConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    if is_yaml(path) {
        parse_yaml(&content)
    } else {
        parse_toml(&content)
    }
}

/// Load and validate configuration from a file.
pub fn load_config(path: &Path) -> Result<MonitorConfig, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

pub fn parse_toml(content: &str) -> Result<MonitorConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Parse YAML: either a full config mapping or a bare endpoint list.
///
/// The document shape is decided first so that errors name the offending
/// field instead of failing both shapes at once.
pub fn parse_yaml(content: &str) -> Result<MonitorConfig, ConfigError> {
    let config = match serde_yaml::from_str(content)? {
        serde_yaml::Value::Null => MonitorConfig::default(),
        serde_yaml::Value::Sequence(_) => MonitorConfig {
            endpoints: serde_yaml::from_str::<Vec<EndpointConfig>>(content)?,
            ..MonitorConfig::default()
        },
        _ => serde_yaml::from_str(content)?,
    };
    Ok(config)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    )
}
