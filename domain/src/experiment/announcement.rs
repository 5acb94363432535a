//! Contest result announcement

use crate::core::identity::ParticipantId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Broadcast naming the winners of a contest
///
/// The prize is an opaque, ordered list of application-defined values. A
/// contest run without a prize announces an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestAnnouncement {
    /// Identity of the experiment that ran the contest
    pub contest: Uuid,
    pub winners: Vec<ParticipantId>,
    #[serde(default)]
    pub prize: Vec<serde_json::Value>,
}

impl ContestAnnouncement {
    pub fn new(contest: Uuid, winners: Vec<ParticipantId>, prize: Vec<serde_json::Value>) -> Self {
        Self {
            contest,
            winners,
            prize,
        }
    }

    pub fn has_prize(&self) -> bool {
        !self.prize.is_empty()
    }

    pub fn is_winner(&self, participant: &ParticipantId) -> bool {
        self.winners.contains(participant)
    }
}
