//! HTTP Endpoint Availability Monitor Library

pub mod config;
pub mod health;
pub mod lifecycle;
pub mod observability;
pub mod report;

pub use config::MonitorConfig;
pub use health::{
    AvailabilityAggregator, CheckRunner, EndpointDescriptor, MonitoringLoop, ProbeResult, Prober,
};
pub use lifecycle::StopHandle;
