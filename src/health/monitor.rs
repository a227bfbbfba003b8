//! Periodic monitoring loop.
//!
//! # Responsibilities
//! - Run cycles: probe all endpoints → record → compute availability → report
//! - Sleep a fixed interval between the end of one cycle and the next
//! - Observe stop requests at cycle boundaries
//!
//! # Design Decisions
//! - Cycles never overlap; aggregation runs after the fan-out barrier
//! - A stop during the sleep ends it early; a stop mid-cycle waits for the
//!   cycle to finish, probes are never aborted
//! - Interval drift by cycle duration is accepted

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::time;
use tracing::Instrument;

use crate::config::MonitorConfig;
use crate::health::availability::AvailabilityAggregator;
use crate::health::endpoint::EndpointDescriptor;
use crate::health::prober::Prober;
use crate::health::result::ProbeResult;
use crate::health::runner::CheckRunner;
use crate::lifecycle::{LoopState, StopHandle};
use crate::observability::metrics;
use crate::report::Reporter;

/// Default pause between cycles.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("monitoring loop cannot start from state {0:?}")]
    NotIdle(LoopState),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Outcome of one cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// 1-based cycle number.
    pub cycle: u64,
    pub results: Vec<ProbeResult>,
    /// Domains that received at least one result this cycle.
    pub domains_updated: usize,
    /// Cumulative availability after this cycle.
    pub availability: BTreeMap<String, u8>,
}

pub struct MonitoringLoop<R> {
    endpoints: Vec<EndpointDescriptor>,
    runner: CheckRunner,
    aggregator: AvailabilityAggregator,
    reporter: R,
    interval: Duration,
    lifecycle: StopHandle,
    cycles: u64,
}

impl<R: Reporter> MonitoringLoop<R> {
    pub fn new(endpoints: Vec<EndpointDescriptor>, runner: CheckRunner, reporter: R) -> Self {
        Self {
            endpoints,
            runner,
            aggregator: AvailabilityAggregator::new(),
            reporter,
            interval: DEFAULT_INTERVAL,
            lifecycle: StopHandle::new(),
            cycles: 0,
        }
    }

    /// Build the loop, its shared client and its endpoints from configuration.
    pub fn from_config(config: &MonitorConfig, reporter: R) -> Result<Self, MonitorError> {
        let prober = Prober::from_config(&config.probe)?;
        let runner = CheckRunner::new(prober).with_max_concurrency(config.probe.max_concurrency);
        let endpoints = config.endpoints.iter().map(EndpointDescriptor::from).collect();

        Ok(Self::new(endpoints, runner, reporter)
            .with_interval(Duration::from_secs(config.monitor.interval_secs))
            .with_aggregator(
                AvailabilityAggregator::new().with_history_limit(config.monitor.history_limit),
            ))
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_aggregator(mut self, aggregator: AvailabilityAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Handle for stopping the loop from another task.
    pub fn stop_handle(&self) -> StopHandle {
        self.lifecycle.clone()
    }

    pub fn stop(&self) {
        self.lifecycle.stop();
    }

    pub fn state(&self) -> LoopState {
        self.lifecycle.state()
    }

    pub fn endpoints(&self) -> &[EndpointDescriptor] {
        &self.endpoints
    }

    pub fn aggregator(&self) -> &AvailabilityAggregator {
        &self.aggregator
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Completed cycles so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Run one full cycle and hand its availability map to the reporter.
    pub async fn run_cycle(&mut self) -> CycleReport {
        let cycle = self.cycles + 1;
        let span = tracing::info_span!("cycle", cycle);

        let report = async {
            let started = Instant::now();
            let results = self.runner.run(&self.endpoints).await;

            let up = results.iter().filter(|r| r.is_up()).count();
            let domains_updated = self.aggregator.record(results.iter().cloned());
            let availability = self.aggregator.availability();
            metrics::record_cycle(&availability);

            tracing::info!(
                endpoints = results.len(),
                up,
                down = results.len() - up,
                domains = domains_updated,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Cycle complete"
            );

            if let Err(e) = self.reporter.report(cycle, &availability) {
                tracing::error!(error = %e, "Failed to report availability");
            }

            CycleReport {
                cycle,
                results,
                domains_updated,
                availability,
            }
        }
        .instrument(span)
        .await;

        self.cycles = cycle;
        report
    }

    /// Run cycles until stopped. Moves the loop `Idle → Running`; returns
    /// once it is `Stopped`.
    pub async fn start(&mut self) -> Result<(), MonitorError> {
        self.lifecycle.begin().map_err(MonitorError::NotIdle)?;
        tracing::info!(
            endpoints = self.endpoints.len(),
            interval_secs = self.interval.as_secs_f64(),
            "Monitoring loop starting"
        );

        loop {
            self.run_cycle().await;
            if self.lifecycle.is_stopped() {
                break;
            }

            tracing::debug!(interval = ?self.interval, "Sleeping until next cycle");
            tokio::select! {
                _ = time::sleep(self.interval) => {}
                _ = self.lifecycle.stopped() => {}
            }
            if self.lifecycle.is_stopped() {
                break;
            }
        }

        tracing::info!(cycles = self.cycles, "Monitoring loop stopped");
        Ok(())
    }
}
