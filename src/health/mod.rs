//! Health checking engine.
//!
//! # Data Flow
//! ```text
//! Monitoring loop (monitor.rs):
//!     Fixed interval, stop observed between cycles
//!     → Check runner (runner.rs): all endpoints concurrently
//!         → Prober (prober.rs): one request, bounded timeout
//!         → ProbeResult (result.rs): UP/DOWN classification
//!     → barrier: every probe resolved
//!     → Aggregator (availability.rs): per-domain history
//!     → availability map → Reporter
//! ```
//!
//! # Design Decisions
//! - Probe failures never escape the prober; they become DOWN results
//! - One HTTP client per process, shared by every probe
//! - Availability is cumulative since process start, keyed by domain

pub mod availability;
pub mod endpoint;
pub mod monitor;
pub mod prober;
pub mod result;
pub mod runner;

pub use availability::AvailabilityAggregator;
pub use endpoint::EndpointDescriptor;
pub use monitor::{CycleReport, MonitorError, MonitoringLoop};
pub use prober::{ProbeError, Prober};
pub use result::ProbeResult;
pub use runner::CheckRunner;
