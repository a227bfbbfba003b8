//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML/YAML)
//!     → loader.rs (parse & deserialize)
//!     → CLI overrides (main.rs)
//!     → validation.rs (semantic checks)
//!     → MonitorConfig (validated, immutable)
//!     → endpoint descriptors + probe/schedule settings
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, read_config, ConfigError};
pub use schema::{EndpointConfig, LogFormat, MonitorConfig, ObservabilityConfig, ProbeConfig, ScheduleConfig};
pub use validation::{validate_config, ValidationError};
