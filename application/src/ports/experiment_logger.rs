//! Port for structured experiment logging.
//!
//! Defines the [`ExperimentLogger`] trait for recording experiment events
//! (launch, surveys sent, responses accepted or discarded, conclusion,
//! contest announcements) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures a
//! machine-readable audit trail (e.g. JSONL) of every experiment.

use serde_json::Value;
use std::sync::Arc;

/// A structured experiment event for logging.
#[derive(Debug, Clone)]
pub struct ExperimentEvent {
    /// Event type identifier (e.g., "launched", "response_accepted", "concluded").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ExperimentEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging experiment events to a structured log.
///
/// The `log` method is synchronous and non-fallible: it is called from
/// inside the experiment's critical section, and logging failures must never
/// disturb the protocol.
pub trait ExperimentLogger: Send + Sync {
    fn log(&self, event: ExperimentEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoExperimentLogger;

impl ExperimentLogger for NoExperimentLogger {
    fn log(&self, _event: ExperimentEvent) {}
}

/// Fans every event out to several loggers, in registration order.
///
/// Used by the CLI to write the JSONL audit trail and echo events to the
/// terminal at the same time.
#[derive(Default)]
pub struct CompositeExperimentLogger {
    delegates: Vec<Arc<dyn ExperimentLogger>>,
}

impl CompositeExperimentLogger {
    pub fn new(delegates: Vec<Arc<dyn ExperimentLogger>>) -> Self {
        Self { delegates }
    }

    pub fn push(&mut self, logger: Arc<dyn ExperimentLogger>) {
        self.delegates.push(logger);
    }

    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }
}

impl ExperimentLogger for CompositeExperimentLogger {
    fn log(&self, event: ExperimentEvent) {
        if let Some((last, rest)) = self.delegates.split_last() {
            for d in rest {
                d.log(event.clone());
            }
            last.log(event);
        }
    }
}
