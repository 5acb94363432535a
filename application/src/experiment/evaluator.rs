//! Pluggable decision strategies
//!
//! An [`Evaluator`] sees every accepted response together with a mutable
//! view of the ballot. It never returns a verdict: it records responders and
//! calls [`ExperimentBallot::finalize`] or [`ExperimentBallot::end`] when it
//! has seen enough. Anything it leaves undecided is settled by the timeout.

use super::experiment::{Experiment, ExperimentBallot};
use crate::ports::experiment_logger::ExperimentEvent;
use poll_domain::{
    ContestAnnouncement, ExperimentOutcome, GroupEvent, ParticipantId, Response,
};
use serde_json::json;
use tracing::debug;

/// Strategy invoked once per accepted response
pub trait Evaluator: Send + Sync {
    /// Inspect `response` and update the ballot
    ///
    /// Called with the experiment's lock held, so concurrent responses are
    /// evaluated one at a time.
    fn evaluate(&self, ballot: &mut ExperimentBallot<'_>, response: &Response);

    /// Hook run once after the experiment concludes, before it leaves the group
    fn on_conclusion(&self, _conclusion: &Conclusion<'_>) {}
}

impl<F> Evaluator for F
where
    F: Fn(&mut ExperimentBallot<'_>, &Response) + Send + Sync,
{
    fn evaluate(&self, ballot: &mut ExperimentBallot<'_>, response: &Response) {
        self(ballot, response)
    }
}

/// What an evaluator can see and do once the experiment has concluded
pub struct Conclusion<'a> {
    experiment: &'a Experiment,
    outcome: &'a ExperimentOutcome,
}

impl<'a> Conclusion<'a> {
    pub(crate) fn new(experiment: &'a Experiment, outcome: &'a ExperimentOutcome) -> Self {
        Self {
            experiment,
            outcome,
        }
    }

    pub fn outcome(&self) -> &ExperimentOutcome {
        self.outcome
    }

    pub fn experiment_id(&self) -> ParticipantId {
        self.experiment.id()
    }

    /// Broadcast an announcement to the whole group
    pub fn announce(&self, announcement: ContestAnnouncement) {
        debug!(
            experiment = %self.experiment.id(),
            winners = announcement.winners.len(),
            "Broadcasting announcement"
        );
        self.experiment.log(ExperimentEvent::new(
            "announcement",
            json!({
                "experiment": self.experiment.id(),
                "contest": announcement.contest,
                "winners": announcement.winners,
                "prize": announcement.prize,
            }),
        ));
        self.experiment
            .broadcast(GroupEvent::Announcement(announcement));
    }
}
