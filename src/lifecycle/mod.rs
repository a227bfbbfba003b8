//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Parse args → Load config → Validate → Logging → Metrics → Loop
//!
//! Shutdown (shutdown.rs):
//!     stop() → loop observes Stopped at the next cycle boundary → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → stop()
//!     Second SIGTERM/SIGINT → forced exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::{LoopState, StopHandle};
