//! HTTP Endpoint Availability Monitor
//!
//! Probes a fixed set of HTTP endpoints every cycle and reports cumulative
//! availability per domain.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────┐   ┌───────────────────────────── monitoring loop ─────────────────────────────┐
//!   │  config  │──▶│  ┌──────────────┐    ┌──────────┐    ┌──────────────┐    ┌──────────┐  │
//!   │ toml/yaml│   │  │ check runner │───▶│  probes  │───▶│  aggregator  │───▶│ reporter │──┼──▶ stdout
//!   └──────────┘   │  │  (fan-out)   │    │(parallel)│    │ (per domain) │    │          │  │
//!                  │  └──────────────┘    └──────────┘    └──────────────┘    └──────────┘  │
//!   ┌──────────┐   │        ▲                                                              │
//!   │ signals  │──▶│   sleep(interval) ◀── stop observed between cycles                    │
//!   └──────────┘   └───────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use endpoint_monitor::config::{read_config, validate_config, ConfigError, MonitorConfig};
use endpoint_monitor::health::MonitoringLoop;
use endpoint_monitor::lifecycle::signals;
use endpoint_monitor::observability::{logging, metrics};
use endpoint_monitor::report::{ConsoleReporter, ReportFormat};

#[derive(Parser)]
#[command(name = "endpoint-monitor", version)]
#[command(about = "Periodically probe HTTP endpoints and report availability per domain", long_about = None)]
struct Cli {
    /// Configuration file (.toml, .yaml or .yml)
    config: PathBuf,

    /// Seconds between cycles (overrides monitor.interval_secs)
    #[arg(long)]
    interval: Option<u64>,

    /// Per-request timeout in milliseconds (overrides probe.timeout_ms)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Run a single cycle, report it and exit
    #[arg(long)]
    once: bool,

    /// Report output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("endpoint-monitor: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load(&cli)?;

    logging::init_logging(&config.observability);
    tracing::info!("endpoint-monitor v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        path = %cli.config.display(),
        endpoints = config.endpoints.len(),
        interval_secs = config.monitor.interval_secs,
        timeout_ms = config.probe.timeout_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let reporter = ConsoleReporter::stdout(cli.format.into());
    let mut monitor = MonitoringLoop::from_config(&config, reporter)?;

    if cli.once {
        monitor.run_cycle().await;
        return Ok(());
    }

    let signal_task = signals::install(monitor.stop_handle());
    monitor.start().await?;
    signal_task.abort();

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Read the config file, apply CLI overrides, then validate.
fn load(cli: &Cli) -> Result<MonitorConfig, ConfigError> {
    let mut config = read_config(&cli.config)?;
    if let Some(interval) = cli.interval {
        config.monitor.interval_secs = interval;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.probe.timeout_ms = timeout_ms;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
