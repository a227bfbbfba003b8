//! Availability reporting.
//!
//! The monitoring loop pushes one availability map per cycle to a
//! [`Reporter`]. Delivery is one-way: a failing reporter is logged and the
//! loop carries on.

use std::collections::BTreeMap;
use std::io;
use std::sync::{Arc, Mutex};

pub mod console;

pub use console::{ConsoleReporter, ReportFormat};

/// Receives the availability map at the end of every cycle.
pub trait Reporter: Send {
    fn report(&mut self, cycle: u64, availability: &BTreeMap<String, u8>) -> io::Result<()>;
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn report(&mut self, cycle: u64, availability: &BTreeMap<String, u8>) -> io::Result<()> {
        (**self).report(cycle, availability)
    }
}

/// Keeps every report in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryReporter {
    reports: Arc<Mutex<Vec<(u64, BTreeMap<String, u8>)>>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports received so far, in cycle order.
    pub fn reports(&self) -> Vec<(u64, BTreeMap<String, u8>)> {
        self.reports.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.reports.lock().map(|r| r.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Reporter for MemoryReporter {
    fn report(&mut self, cycle: u64, availability: &BTreeMap<String, u8>) -> io::Result<()> {
        self.reports
            .lock()
            .map_err(|_| io::Error::other("report buffer poisoned"))?
            .push((cycle, availability.clone()));
        Ok(())
    }
}
