//! Experiment lifecycle state and final outcome

use crate::core::identity::ParticipantId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Lifecycle state of an experiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentState {
    /// Built but not yet registered with the group
    #[default]
    NotStarted,
    /// Registered and accepting responses
    InProgress,
    /// Terminal; the ballot is frozen
    Concluded,
}

impl ExperimentState {
    pub fn is_in_progress(&self) -> bool {
        matches!(self, ExperimentState::InProgress)
    }

    pub fn is_concluded(&self) -> bool {
        matches!(self, ExperimentState::Concluded)
    }
}

impl std::fmt::Display for ExperimentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExperimentState::NotStarted => write!(f, "not started"),
            ExperimentState::InProgress => write!(f, "in progress"),
            ExperimentState::Concluded => write!(f, "concluded"),
        }
    }
}

/// What brought an experiment to its conclusion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConclusionReason {
    /// A result was finalized explicitly (normally by the evaluator)
    Decided,
    /// The configured timeout elapsed first; result is negative
    Timeout,
    /// Ended directly by the owner without a decision
    Cancelled,
}

impl ConclusionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConclusionReason::Decided => "decided",
            ConclusionReason::Timeout => "timeout",
            ConclusionReason::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for ConclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final, frozen result of a concluded experiment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentOutcome {
    pub result: bool,
    pub reason: ConclusionReason,
    pub positive_responders: HashSet<ParticipantId>,
    pub negative_responders: HashSet<ParticipantId>,
}

impl ExperimentOutcome {
    /// Whether the result came from a decision rather than a fallback
    pub fn is_decisive(&self) -> bool {
        matches!(self.reason, ConclusionReason::Decided)
    }

    /// Compact tally, e.g. `"3 positive / 1 negative"`
    pub fn tally_summary(&self) -> String {
        format!(
            "{} positive / {} negative",
            self.positive_responders.len(),
            self.negative_responders.len()
        )
    }
}
