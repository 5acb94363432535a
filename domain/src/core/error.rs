//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid group name: {0}")]
    InvalidGroup(String),

    #[error("Invalid proposition: {0}")]
    InvalidProposition(String),

    #[error("Proposition template expects {expected} argument(s), got {actual}")]
    ArgumentMismatch { expected: usize, actual: usize },

    #[error("Invalid participant id: {0}")]
    InvalidParticipant(String),
}
