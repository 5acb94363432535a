//! Group-communication adapters
//!
//! Provides [`InProcessGroupBus`], which implements the
//! [`GroupPort`](poll_application::GroupPort) for participants living in the
//! same process.

mod in_process;

pub use in_process::{AccessPolicy, InProcessGroupBus};
