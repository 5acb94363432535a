//! Per-experiment tally of active propositions and partitioned responders

use crate::belief::Proposition;
use crate::core::identity::ParticipantId;
use serde::Serialize;
use std::collections::HashSet;

/// Ballot owned by exactly one experiment
///
/// Tracks which propositions are still awaiting answers and which
/// participants were judged to support or oppose the hypothesis. The two
/// responder sets are *not* forced to be disjoint; keeping them apart is the
/// evaluator's business.
///
/// Once frozen the ballot is read-only, and every mutator reports `false`.
/// Accessors return owned snapshots, never live views.
///
/// # Example
///
/// ```
/// use poll_domain::{Ballot, ParticipantId};
///
/// let mut ballot = Ballot::new();
/// let alice = ParticipantId::random();
///
/// assert!(ballot.add_positive(alice));
/// assert!(!ballot.add_positive(alice)); // already counted
///
/// ballot.freeze();
/// assert!(!ballot.add_negative(alice));
/// assert_eq!(ballot.positive_responders().len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct Ballot {
    active_surveys: HashSet<Proposition>,
    positive_responders: HashSet<ParticipantId>,
    negative_responders: HashSet<ParticipantId>,
    frozen: bool,
}

impl Ballot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a proposition as awaiting responses
    ///
    /// Returns `false` if it was already active or the ballot is frozen.
    pub fn activate(&mut self, proposition: Proposition) -> bool {
        !self.frozen && self.active_surveys.insert(proposition)
    }

    pub fn is_active(&self, proposition: &Proposition) -> bool {
        self.active_surveys.contains(proposition)
    }

    /// Count a respondent as supporting; `true` if newly added
    pub fn add_positive(&mut self, respondent: ParticipantId) -> bool {
        !self.frozen && self.positive_responders.insert(respondent)
    }

    /// Count a respondent as opposing; `true` if newly added
    pub fn add_negative(&mut self, respondent: ParticipantId) -> bool {
        !self.frozen && self.negative_responders.insert(respondent)
    }

    /// Stop accepting mutations. Data is kept for inspection.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Borrow the positive set for in-place comparisons
    pub(crate) fn positive_ref(&self) -> &HashSet<ParticipantId> {
        &self.positive_responders
    }

    pub fn active_surveys(&self) -> HashSet<Proposition> {
        self.active_surveys.clone()
    }

    pub fn positive_responders(&self) -> HashSet<ParticipantId> {
        self.positive_responders.clone()
    }

    pub fn negative_responders(&self) -> HashSet<ParticipantId> {
        self.negative_responders.clone()
    }

    /// Whether the positive responders cover every participant
    pub fn positives_cover(&self, participants: &HashSet<ParticipantId>) -> bool {
        crate::consensus::tally::covers(self.positive_ref(), participants)
    }
}
