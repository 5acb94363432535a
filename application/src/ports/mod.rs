//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.
//! All of them are synchronous: sending into a group and scheduling a
//! timeout are fire-and-forget, and none of them block on I/O.

pub mod experiment_logger;
pub mod group;
pub mod knowledge;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod testing;
