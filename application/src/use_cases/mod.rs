//! Use cases
//!
//! Participant-facing operations built on the experiment engine.

pub mod respond;
pub mod socialise;
