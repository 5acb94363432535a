//! Message scope
//!
//! A scope selects a subset of a group's members. Propositions are emitted
//! into a scope, and the prebuilt strategies compare their tallies against
//! the current members of the response scope.

use super::identity::ParticipantId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Subset of group members a message is addressed to
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Every member of the group
    #[default]
    All,
    /// Only the listed participants
    Participants(HashSet<ParticipantId>),
}

impl Scope {
    /// Scope addressing exactly the given participants
    pub fn participants(ids: impl IntoIterator<Item = ParticipantId>) -> Self {
        Scope::Participants(ids.into_iter().collect())
    }

    /// Scope addressing a single participant (used for replies)
    pub fn only(id: ParticipantId) -> Self {
        Scope::Participants(HashSet::from([id]))
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        match self {
            Scope::All => true,
            Scope::Participants(ids) => ids.contains(id),
        }
    }

    /// Members of `members` that fall inside this scope
    pub fn restrict(&self, members: &HashSet<ParticipantId>) -> HashSet<ParticipantId> {
        match self {
            Scope::All => members.clone(),
            Scope::Participants(ids) => members.intersection(ids).copied().collect(),
        }
    }
}
