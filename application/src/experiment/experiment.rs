//! Running experiment: the poll state machine
//!
//! An [`Experiment`] is registered in its group as an observer listener. It
//! filters inbound responses against its active surveys, hands accepted ones
//! to the [`Evaluator`], and concludes exactly once.
//!
//! All state transitions happen behind one per-instance mutex. Result
//! callbacks, the evaluator's conclusion hook and unregistration run after
//! the lock is released, so a callback may freely inspect the experiment.

use super::evaluator::{Conclusion, Evaluator};
use crate::ports::experiment_logger::{ExperimentEvent, ExperimentLogger};
use crate::ports::group::{GroupListener, GroupPort};
use poll_domain::{
    Address, Ballot, ConclusionReason, ExperimentOutcome, ExperimentState, GroupEvent, GroupId,
    ParticipantId, Proposition, Response, Scope,
};
use serde_json::json;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, trace};

/// Callback receiving the final boolean result
pub type ResultCallback = Box<dyn FnOnce(bool) + Send + 'static>;

/// Callback receiving the full frozen outcome
pub type OutcomeCallback = Box<dyn FnOnce(&ExperimentOutcome) + Send + 'static>;

/// Work left to do after a conclusion, performed outside the lock
struct Delivery {
    outcome: ExperimentOutcome,
    on_result: Option<ResultCallback>,
    on_outcome: Option<OutcomeCallback>,
}

struct ExperimentInner {
    state: ExperimentState,
    ballot: Ballot,
    outcome: Option<ExperimentOutcome>,
    on_result: Option<ResultCallback>,
    on_outcome: Option<OutcomeCallback>,
    pending: Option<Delivery>,
}

impl ExperimentInner {
    /// Move to `Concluded` if still in progress; returns whether it did
    fn conclude(&mut self, result: bool, reason: ConclusionReason) -> bool {
        if !self.state.is_in_progress() {
            return false;
        }
        self.state = ExperimentState::Concluded;
        self.ballot.freeze();

        let outcome = ExperimentOutcome {
            result,
            reason,
            positive_responders: self.ballot.positive_responders(),
            negative_responders: self.ballot.negative_responders(),
        };
        self.outcome = Some(outcome.clone());
        self.pending = Some(Delivery {
            outcome,
            on_result: self.on_result.take(),
            on_outcome: self.on_outcome.take(),
        });
        true
    }
}

/// One run of the polling protocol, from launch to finalized result
///
/// Created by [`ExperimentBuilder`](super::ExperimentBuilder); never exists
/// in a half-started state outside the builder.
pub struct Experiment {
    id: ParticipantId,
    group: GroupId,
    address: Address,
    port: Arc<dyn GroupPort>,
    evaluator: Box<dyn Evaluator>,
    logger: Arc<dyn ExperimentLogger>,
    response_scope: Scope,
    inner: Mutex<ExperimentInner>,
}

impl Experiment {
    pub(crate) fn new(
        group: GroupId,
        port: Arc<dyn GroupPort>,
        evaluator: Box<dyn Evaluator>,
        logger: Arc<dyn ExperimentLogger>,
        response_scope: Scope,
        on_result: Option<ResultCallback>,
        on_outcome: Option<OutcomeCallback>,
    ) -> Self {
        let id = ParticipantId::random();
        Self {
            id,
            address: Address::new(group.clone(), id),
            group,
            port,
            evaluator,
            logger,
            response_scope,
            inner: Mutex::new(ExperimentInner {
                state: ExperimentState::NotStarted,
                ballot: Ballot::new(),
                outcome: None,
                on_result,
                on_outcome,
                pending: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ExperimentInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn id(&self) -> ParticipantId {
        self.id
    }

    pub fn group(&self) -> &GroupId {
        &self.group
    }

    /// Address replies are routed to
    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn response_scope(&self) -> &Scope {
        &self.response_scope
    }

    pub fn state(&self) -> ExperimentState {
        self.lock().state
    }

    pub fn in_progress(&self) -> bool {
        self.state().is_in_progress()
    }

    /// Frozen outcome, available once concluded
    pub fn outcome(&self) -> Option<ExperimentOutcome> {
        self.lock().outcome.clone()
    }

    pub fn active_surveys(&self) -> HashSet<Proposition> {
        self.lock().ballot.active_surveys()
    }

    pub fn positive_responders(&self) -> HashSet<ParticipantId> {
        self.lock().ballot.positive_responders()
    }

    pub fn negative_responders(&self) -> HashSet<ParticipantId> {
        self.lock().ballot.negative_responders()
    }

    /// Current members of the group that fall inside the response scope
    pub fn participants(&self) -> HashSet<ParticipantId> {
        let mut members = self
            .response_scope
            .restrict(&self.port.current_members(&self.group));
        members.remove(&self.id);
        members
    }

    /// Send further propositions while in progress
    ///
    /// Propositions that are already active are skipped. Returns `false`
    /// without sending anything if the experiment is not in progress.
    pub fn survey_participants(
        &self,
        propositions: impl IntoIterator<Item = Proposition>,
        scope: &Scope,
    ) -> bool {
        let mut inner = self.lock();
        self.survey_locked(&mut *inner, propositions, scope)
    }

    /// Conclude with `result`; returns `false` if already concluded
    pub fn finalize(&self, result: bool) -> bool {
        self.conclude(result, ConclusionReason::Decided)
    }

    /// Stop without a decision; the result callback receives `false`
    pub fn end(&self) -> bool {
        self.conclude(false, ConclusionReason::Cancelled)
    }

    /// Alias of [`end`](Self::end) for owners abandoning a poll
    pub fn cancel(&self) -> bool {
        self.end()
    }

    pub(crate) fn timeout(&self) -> bool {
        self.conclude(false, ConclusionReason::Timeout)
    }

    /// Mark in progress and send the initial propositions to the response scope
    pub(crate) fn start(&self, propositions: Vec<Proposition>) {
        let mut inner = self.lock();
        inner.state = ExperimentState::InProgress;
        let scope = self.response_scope.clone();
        self.survey_locked(&mut *inner, propositions, &scope);
    }

    pub(crate) fn log(&self, event: ExperimentEvent) {
        self.logger.log(event);
    }

    pub(crate) fn broadcast(&self, event: GroupEvent) {
        self.port.broadcast(&self.address, event);
    }

    fn survey_locked(
        &self,
        inner: &mut ExperimentInner,
        propositions: impl IntoIterator<Item = Proposition>,
        scope: &Scope,
    ) -> bool {
        if !inner.state.is_in_progress() {
            return false;
        }

        for proposition in propositions {
            if inner.ballot.is_active(&proposition) {
                trace!(experiment = %self.id, %proposition, "Skipping duplicate survey");
                continue;
            }
            let proposition = proposition.with_source(self.address.clone());
            inner.ballot.activate(proposition.clone());

            debug!(experiment = %self.id, %proposition, "Surveying participants");
            self.logger.log(ExperimentEvent::new(
                "survey_sent",
                json!({
                    "experiment": self.id,
                    "group": self.group,
                    "proposition": proposition.rendered(),
                    "scope": scope,
                }),
            ));
            self.port
                .send(&self.address, GroupEvent::Proposition(proposition), scope);
        }
        true
    }

    fn conclude(&self, result: bool, reason: ConclusionReason) -> bool {
        let delivery = {
            let mut inner = self.lock();
            if !inner.conclude(result, reason) {
                return false;
            }
            inner.pending.take()
        };
        if let Some(delivery) = delivery {
            self.deliver(delivery);
        }
        true
    }

    fn deliver(&self, delivery: Delivery) {
        let Delivery {
            outcome,
            on_result,
            on_outcome,
        } = delivery;

        self.evaluator
            .on_conclusion(&Conclusion::new(self, &outcome));
        self.port.unregister(&self.group, &self.id);

        info!(
            experiment = %self.id,
            group = %self.group,
            result = outcome.result,
            reason = %outcome.reason,
            tally = %outcome.tally_summary(),
            "Experiment concluded"
        );
        self.logger.log(ExperimentEvent::new(
            "concluded",
            json!({
                "experiment": self.id,
                "group": self.group,
                "result": outcome.result,
                "reason": outcome.reason,
                "positive": outcome.positive_responders,
                "negative": outcome.negative_responders,
            }),
        ));

        if let Some(callback) = on_result {
            callback(outcome.result);
        }
        if let Some(callback) = on_outcome {
            callback(&outcome);
        }
    }
}

impl GroupListener for Experiment {
    fn id(&self) -> ParticipantId {
        self.id
    }

    fn counts_as_participant(&self) -> bool {
        false
    }

    fn on_response(&self, response: Response) {
        let delivery = {
            let mut inner = self.lock();
            if !inner.state.is_in_progress() || !inner.ballot.is_active(response.proposition()) {
                trace!(
                    experiment = %self.id,
                    respondent = %response.respondent(),
                    state = %inner.state,
                    "Discarding response"
                );
                self.logger.log(ExperimentEvent::new(
                    "response_discarded",
                    json!({
                        "experiment": self.id,
                        "respondent": response.respondent(),
                        "proposition": response.proposition().rendered(),
                        "state": inner.state.to_string(),
                    }),
                ));
                return;
            }

            self.logger.log(ExperimentEvent::new(
                "response_accepted",
                json!({
                    "experiment": self.id,
                    "respondent": response.respondent(),
                    "proposition": response.proposition().rendered(),
                    "believed": response.believed(),
                }),
            ));

            let mut ballot = ExperimentBallot {
                experiment: self,
                inner: &mut *inner,
            };
            self.evaluator.evaluate(&mut ballot, &response);
            inner.pending.take()
        };

        if let Some(delivery) = delivery {
            self.deliver(delivery);
        }
    }
}

impl std::fmt::Debug for Experiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Experiment")
            .field("id", &self.id)
            .field("group", &self.group)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Mutable view of a running experiment handed to an [`Evaluator`]
///
/// Exists only while the experiment's lock is held. A conclusion requested
/// through it is delivered once the evaluator returns.
pub struct ExperimentBallot<'a> {
    experiment: &'a Experiment,
    inner: &'a mut ExperimentInner,
}

impl ExperimentBallot<'_> {
    pub fn experiment_id(&self) -> ParticipantId {
        self.experiment.id
    }

    pub fn in_progress(&self) -> bool {
        self.inner.state.is_in_progress()
    }

    /// Record the response's respondent as positive; `true` if newly added
    pub fn add_positive_response(&mut self, response: &Response) -> bool {
        self.add_positive_responder(response.respondent())
    }

    pub fn add_positive_responder(&mut self, responder: ParticipantId) -> bool {
        self.inner.ballot.add_positive(responder)
    }

    /// Record the response's respondent as negative; `true` if newly added
    pub fn add_negative_response(&mut self, response: &Response) -> bool {
        self.add_negative_responder(response.respondent())
    }

    pub fn add_negative_responder(&mut self, responder: ParticipantId) -> bool {
        self.inner.ballot.add_negative(responder)
    }

    pub fn active_surveys(&self) -> HashSet<Proposition> {
        self.inner.ballot.active_surveys()
    }

    pub fn positive_responders(&self) -> HashSet<ParticipantId> {
        self.inner.ballot.positive_responders()
    }

    pub fn negative_responders(&self) -> HashSet<ParticipantId> {
        self.inner.ballot.negative_responders()
    }

    /// Whether the positive tally covers every given participant
    pub fn positives_cover(&self, participants: &HashSet<ParticipantId>) -> bool {
        self.inner.ballot.positives_cover(participants)
    }

    /// Current members of the response scope
    pub fn participants(&self) -> HashSet<ParticipantId> {
        self.experiment.participants()
    }

    pub fn survey_participants(
        &mut self,
        propositions: impl IntoIterator<Item = Proposition>,
        scope: &Scope,
    ) -> bool {
        self.experiment
            .survey_locked(self.inner, propositions, scope)
    }

    pub fn finalize(&mut self, result: bool) -> bool {
        self.inner.conclude(result, ConclusionReason::Decided)
    }

    pub fn end(&mut self) -> bool {
        self.inner.conclude(false, ConclusionReason::Cancelled)
    }
}
