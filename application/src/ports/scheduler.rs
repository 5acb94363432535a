//! Timeout scheduling port
//!
//! The experiment launcher hands a one-shot task to the scheduler when a
//! finite timeout is configured. No cancellation primitive is required: a
//! task that fires after the experiment already concluded is a no-op.

use std::time::Duration;

/// Task run once when a timeout elapses
pub type TimeoutTask = Box<dyn FnOnce() + Send + 'static>;

/// Port for firing a callback once after a delay
///
/// Implementations run the task on their own execution context,
/// concurrently with any in-flight response delivery.
pub trait TimeoutScheduler: Send + Sync {
    fn schedule_once(&self, delay: Duration, task: TimeoutTask);
}
