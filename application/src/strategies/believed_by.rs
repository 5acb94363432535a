//! Unanimity and existence strategies

use crate::experiment::{Evaluator, ExperimentBallot};
use poll_domain::Response;
use poll_domain::consensus::covers;
use tracing::trace;

/// Concludes `true` once every current participant answered `expected`
///
/// A single answer other than `expected` concludes `false` immediately,
/// without waiting for the remaining participants.
#[derive(Debug, Clone, Copy)]
pub struct BelievedByAll {
    expected: bool,
}

impl BelievedByAll {
    pub fn new(expected: bool) -> Self {
        Self { expected }
    }

    pub fn expected(&self) -> bool {
        self.expected
    }
}

impl Default for BelievedByAll {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Evaluator for BelievedByAll {
    fn evaluate(&self, ballot: &mut ExperimentBallot<'_>, response: &Response) {
        let participants = ballot.participants();
        if !participants.contains(&response.respondent()) {
            trace!(respondent = %response.respondent(), "Ignoring response from outside the scope");
            return;
        }

        if response.believed() == self.expected {
            ballot.add_positive_response(response);
            if ballot.positives_cover(&participants) {
                ballot.finalize(true);
            }
        } else {
            ballot.add_negative_response(response);
            ballot.finalize(false);
        }
    }
}

/// Concludes `true` on the first participant that believes the proposition
///
/// Negative answers are tallied and otherwise left to the timeout, unless
/// [`conclude_when_exhausted`](Self::conclude_when_exhausted) is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct BelievedByAny {
    conclude_when_exhausted: bool,
}

impl BelievedByAny {
    pub fn new() -> Self {
        Self::default()
    }

    /// Conclude `false` as soon as every current participant answered negatively
    pub fn conclude_when_exhausted(mut self) -> Self {
        self.conclude_when_exhausted = true;
        self
    }
}

impl Evaluator for BelievedByAny {
    fn evaluate(&self, ballot: &mut ExperimentBallot<'_>, response: &Response) {
        let participants = ballot.participants();
        if !participants.contains(&response.respondent()) {
            trace!(respondent = %response.respondent(), "Ignoring response from outside the scope");
            return;
        }

        if response.believed() {
            ballot.add_positive_response(response);
            ballot.finalize(true);
            return;
        }

        ballot.add_negative_response(response);
        if self.conclude_when_exhausted && covers(&ballot.negative_responders(), &participants) {
            ballot.finalize(false);
        }
    }
}

/// Concludes `true` once every current participant disbelieves the proposition
#[derive(Debug, Clone, Copy)]
pub struct BelievedByNone(BelievedByAll);

impl BelievedByNone {
    pub fn new() -> Self {
        Self(BelievedByAll::new(false))
    }
}

impl Default for BelievedByNone {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator for BelievedByNone {
    fn evaluate(&self, ballot: &mut ExperimentBallot<'_>, response: &Response) {
        self.0.evaluate(ballot, response)
    }
}
