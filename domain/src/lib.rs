//! Domain layer for group-poll
//!
//! This crate contains the value objects and pure rules of the group
//! polling protocol. It has no dependencies on transports, schedulers or
//! any other infrastructure concern.
//!
//! # Core Concepts
//!
//! ## Proposition and Response
//!
//! A [`Proposition`] is a statement put to some or all members of a group.
//! Members answer with a boolean [`Disclosure`]; on receipt it becomes a
//! [`Response`] attributed to the transport-level sender.
//!
//! ## Ballot
//!
//! A [`Ballot`] tracks which propositions are still awaiting responses and
//! which participants answered positively or negatively.
//!
//! ## Poll rules
//!
//! [`PollRule`] names the prebuilt strategies: believed by all, by any, by
//! none, and the contest variant.

pub mod belief;
pub mod config;
pub mod consensus;
pub mod core;
pub mod experiment;

// Re-export commonly used types
pub use belief::{Disclosure, Envelope, GroupEvent, Proposition, Response, Term};
pub use config::OutputFormat;
pub use consensus::PollRule;
pub use crate::core::{
    error::DomainError,
    identity::{Address, Credential, GroupId, ParticipantId},
    scope::Scope,
};
pub use experiment::{
    Ballot, ConclusionReason, ContestAnnouncement, ExperimentOutcome, ExperimentState,
};
