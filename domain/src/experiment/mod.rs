//! Experiment domain
//!
//! An experiment (poll) is one run of the group survey protocol: a set of
//! propositions is put to a group, responses are tallied in a [`Ballot`],
//! and a single boolean result is produced exactly once.
//!
//! # Lifecycle
//!
//! ```text
//! NotStarted ──register──▶ InProgress ──finalize / end / timeout──▶ Concluded
//!                              │  ▲
//!                              └──┘ survey / accepted response
//! ```
//!
//! The running state machine lives in the application layer, since it has
//! to talk to the group-communication port. This module holds the pure data.

pub mod announcement;
pub mod ballot;
pub mod state;

pub use announcement::ContestAnnouncement;
pub use ballot::Ballot;
pub use state::{ConclusionReason, ExperimentOutcome, ExperimentState};
