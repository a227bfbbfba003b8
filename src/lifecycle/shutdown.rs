//! Stop coordination for the monitoring loop.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

/// Lifecycle of a monitoring loop.
///
/// ```text
/// Idle → Running → Stopped
/// Idle → Stopped            (stopped before it was started)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

/// Cloneable handle to a loop's lifecycle state.
///
/// Backed by a watch channel, so a stop requested from a signal task wakes a
/// loop that is sleeping between cycles.
#[derive(Debug, Clone)]
pub struct StopHandle {
    tx: Arc<watch::Sender<LoopState>>,
}

impl StopHandle {
    /// Create a handle in the `Idle` state.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(LoopState::Idle);
        Self { tx: Arc::new(tx) }
    }

    /// Request a stop. Idempotent.
    pub fn stop(&self) {
        self.tx.send_if_modified(|state| {
            if *state == LoopState::Stopped {
                false
            } else {
                *state = LoopState::Stopped;
                true
            }
        });
    }

    pub fn state(&self) -> LoopState {
        *self.tx.borrow()
    }

    pub fn is_stopped(&self) -> bool {
        self.state() == LoopState::Stopped
    }

    /// Move `Idle → Running`, or report the state that prevented it.
    pub(crate) fn begin(&self) -> Result<(), LoopState> {
        let mut current = LoopState::Idle;
        let started = self.tx.send_if_modified(|state| {
            current = *state;
            if *state == LoopState::Idle {
                *state = LoopState::Running;
                true
            } else {
                false
            }
        });
        if started {
            Ok(())
        } else {
            Err(current)
        }
    }

    /// Resolve once a stop has been requested (immediately if it already was).
    ///
    /// The returned future owns its receiver and does not borrow the handle.
    pub fn stopped(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            let _ = rx.wait_for(|state| *state == LoopState::Stopped).await;
        }
    }
}

impl Default for StopHandle {
    fn default() -> Self {
        Self::new()
    }
}
