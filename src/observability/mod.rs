//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Engine produces:
//!     → logging.rs (structured log events, per-cycle spans)
//!     → metrics.rs (probe counters, latency histogram, availability gauges)
//!
//! Consumers:
//!     → Log aggregation (stderr, text or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
