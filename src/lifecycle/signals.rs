//! OS signal handling.
//!
//! # Responsibilities
//! - Wait for SIGINT (Ctrl+C) or SIGTERM
//! - Translate the first signal into a stop request
//! - Force exit on a second signal
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe); the handler never touches
//!   loop state directly, it only calls `StopHandle::stop`
//! - In-flight probes are not cancelled by the first signal

use tokio::task::JoinHandle;

use crate::lifecycle::shutdown::StopHandle;

/// Exit status used when a second signal forces termination.
pub const FORCED_EXIT_CODE: i32 = 130;

/// Wait for Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Spawn the signal watcher for a monitoring loop.
pub fn install(stop: StopHandle) -> JoinHandle<()> {
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, stopping after the current cycle");
        stop.stop();

        shutdown_signal().await;
        tracing::warn!("Second shutdown signal received, exiting immediately");
        std::process::exit(FORCED_EXIT_CODE);
    })
}
