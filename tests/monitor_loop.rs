//! Monitoring loop lifecycle against live mock backends.

use std::collections::BTreeMap;
use std::io;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;

use endpoint_monitor::config::{EndpointConfig, MonitorConfig};
use endpoint_monitor::health::{CheckRunner, EndpointDescriptor, MonitoringLoop, Prober};
use endpoint_monitor::lifecycle::LoopState;
use endpoint_monitor::report::{MemoryReporter, Reporter};

mod common;

fn runner(timeout: Duration) -> CheckRunner {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    CheckRunner::new(Prober::new(client, timeout))
}

/// Records the tokio clock at every report.
#[derive(Clone, Default)]
struct TimedReporter {
    at: Arc<Mutex<Vec<Instant>>>,
}

impl TimedReporter {
    fn times(&self) -> Vec<Instant> {
        self.at.lock().unwrap().clone()
    }
}

impl Reporter for TimedReporter {
    fn report(&mut self, _cycle: u64, _availability: &BTreeMap<String, u8>) -> io::Result<()> {
        self.at.lock().unwrap().push(Instant::now());
        Ok(())
    }
}

#[tokio::test]
async fn test_stop_mid_cycle_lets_cycle_finish() {
    let addr = common::start_backend(200, Duration::from_millis(400)).await;
    let reporter = MemoryReporter::new();
    let endpoints = vec![EndpointDescriptor::new("slow", format!("http://{}/", addr))];
    let mut monitor = MonitoringLoop::new(endpoints, runner(Duration::from_secs(5)), reporter.clone())
        .with_interval(Duration::from_secs(3600));
    let stop = monitor.stop_handle();

    let task = tokio::spawn(async move {
        monitor.start().await.unwrap();
        monitor
    });

    // The probe is still in flight.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(reporter.is_empty());
    stop.stop();

    let monitor = tokio::time::timeout(Duration::from_secs(3), task)
        .await
        .expect("loop should exit after the cycle")
        .unwrap();

    assert_eq!(monitor.state(), LoopState::Stopped);
    assert_eq!(monitor.cycles(), 1);
    assert_eq!(reporter.len(), 1);

    // The in-flight probe completed instead of being aborted.
    let domain = addr.to_string();
    let history = monitor.aggregator().history(&domain);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status_code(), 200);
}

#[tokio::test]
async fn test_availability_accumulates_across_cycles() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    // UP, DOWN, UP, UP
    let addr = common::start_programmable_backend(move || {
        let counter = counter.clone();
        async move {
            match counter.fetch_add(1, Ordering::SeqCst) {
                1 => 500,
                _ => 200,
            }
        }
    })
    .await;

    let reporter = MemoryReporter::new();
    let endpoints = vec![EndpointDescriptor::new("index", format!("http://{}/", addr))];
    let mut monitor = MonitoringLoop::new(endpoints, runner(Duration::from_secs(5)), reporter.clone());

    let domain = addr.to_string();
    for _ in 0..3 {
        monitor.run_cycle().await;
    }
    assert_eq!(monitor.aggregator().availability()[&domain], 67);

    let report = monitor.run_cycle().await;
    assert_eq!(report.cycle, 4);
    assert_eq!(report.availability[&domain], 75);

    let percents: Vec<u8> = reporter.reports().iter().map(|(_, m)| m[&domain]).collect();
    assert_eq!(percents, vec![100, 50, 67, 75]);
}

#[tokio::test]
async fn test_shared_host_port_single_bucket() {
    let addr = common::start_backend(200, Duration::ZERO).await;
    let endpoints = vec![
        EndpointDescriptor::new("index", format!("http://{}/", addr)),
        EndpointDescriptor::new("careers", format!("http://{}/careers", addr)),
    ];
    let mut monitor = MonitoringLoop::new(endpoints, runner(Duration::from_secs(5)), MemoryReporter::new());

    let first = monitor.run_cycle().await;
    assert_eq!(first.results.len(), 2);
    assert_eq!(first.domains_updated, 1);
    monitor.run_cycle().await;

    let domain = addr.to_string();
    assert_eq!(monitor.aggregator().history(&domain).len(), 4);
    assert_eq!(monitor.aggregator().availability().len(), 1);
}

#[tokio::test]
async fn test_loop_from_config_with_empty_endpoints() {
    let config = MonitorConfig::default();
    let reporter = MemoryReporter::new();
    let mut monitor = MonitoringLoop::from_config(&config, reporter.clone()).unwrap();

    let report = monitor.run_cycle().await;
    assert!(report.results.is_empty());
    assert!(monitor.aggregator().availability().is_empty());
    assert_eq!(reporter.len(), 1);
}

#[tokio::test]
async fn test_timeout_recorded_as_down() {
    let hang = common::start_silent_backend().await;
    let mut config = MonitorConfig::default();
    config.probe.timeout_ms = 200;
    config.endpoints.push(EndpointConfig {
        name: "hang".to_string(),
        url: format!("http://{}/", hang),
        method: "GET".to_string(),
        headers: Default::default(),
        body: None,
    });

    let mut monitor = MonitoringLoop::from_config(&config, MemoryReporter::new()).unwrap();
    let report = tokio::time::timeout(Duration::from_secs(3), monitor.run_cycle())
        .await
        .expect("cycle must not hang past the probe timeout");

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].status_code(), 0);
    assert!(report.results[0].response_time_ms().is_infinite());
    assert_eq!(report.availability[&hang.to_string()], 0);
}

#[tokio::test(start_paused = true)]
async fn test_interval_measured_from_cycle_end() {
    // Every cycle lasts the full request timeout.
    let hang = common::start_silent_backend().await;
    let timeout = Duration::from_secs(4);
    let interval = Duration::from_secs(10);

    let reporter = TimedReporter::default();
    let endpoints = vec![EndpointDescriptor::new("hang", format!("http://{}/", hang))];
    let mut monitor =
        MonitoringLoop::new(endpoints, runner(timeout), reporter.clone()).with_interval(interval);
    let stop = monitor.stop_handle();

    let begun = Instant::now();
    let task = tokio::spawn(async move { monitor.start().await });
    while reporter.times().len() < 3 {
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
    stop.stop();
    task.await.unwrap().unwrap();

    let times = reporter.times();
    assert!(times[0] - begun >= timeout);
    for pair in times.windows(2) {
        // The sleep starts after the slow cycle, so the gap covers both.
        assert!(pair[1] - pair[0] >= interval + timeout);
    }
}
