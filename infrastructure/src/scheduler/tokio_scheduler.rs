//! One-shot timeouts on the tokio runtime.

use poll_application::ports::scheduler::{TimeoutScheduler, TimeoutTask};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Fires each task once on its own tokio task after the delay
///
/// [`shutdown`](Self::shutdown) drops every pending task without running it.
pub struct TokioTimeoutScheduler {
    runtime: Handle,
    cancel: CancellationToken,
}

impl TokioTimeoutScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            cancel: CancellationToken::new(),
        }
    }

    /// Discard pending timeouts; later schedules are discarded too
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl TimeoutScheduler for TokioTimeoutScheduler {
    fn schedule_once(&self, delay: Duration, task: TimeoutTask) {
        let cancel = self.cancel.clone();
        self.runtime.spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    trace!(?delay, "Timeout discarded");
                }
                _ = tokio::time::sleep(delay) => {
                    trace!(?delay, "Timeout fired");
                    task();
                }
            }
        });
    }
}

impl Drop for TokioTimeoutScheduler {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
