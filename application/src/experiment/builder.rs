//! Fluent configuration and atomic launch of experiments

use super::error::LaunchError;
use super::evaluator::Evaluator;
use super::experiment::{Experiment, ExperimentBallot, OutcomeCallback, ResultCallback};
use crate::ports::experiment_logger::{ExperimentEvent, ExperimentLogger, NoExperimentLogger};
use crate::ports::group::{GroupListener, GroupPort};
use crate::ports::scheduler::TimeoutScheduler;
use poll_domain::{Credential, ExperimentOutcome, GroupId, Proposition, Response, Scope};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Single-use builder for an [`Experiment`]
///
/// # Example
///
/// ```ignore
/// let experiment = ExperimentBuilder::new(bus, scheduler)
///     .group(group)
///     .proposition(Proposition::new("raining")?)
///     .evaluator(BelievedByAll::new(true))
///     .end_after(Duration::from_secs(2))
///     .on_result(|result| println!("{result}"))
///     .execute()?;
/// ```
pub struct ExperimentBuilder {
    port: Arc<dyn GroupPort>,
    scheduler: Arc<dyn TimeoutScheduler>,
    group: Option<GroupId>,
    credential: Option<Credential>,
    propositions: Vec<Proposition>,
    response_scope: Scope,
    evaluator: Option<Box<dyn Evaluator>>,
    timeout: Option<Duration>,
    on_result: Option<ResultCallback>,
    on_outcome: Option<OutcomeCallback>,
    logger: Arc<dyn ExperimentLogger>,
}

impl ExperimentBuilder {
    pub fn new(port: Arc<dyn GroupPort>, scheduler: Arc<dyn TimeoutScheduler>) -> Self {
        Self {
            port,
            scheduler,
            group: None,
            credential: None,
            propositions: Vec::new(),
            response_scope: Scope::All,
            evaluator: None,
            timeout: None,
            on_result: None,
            on_outcome: None,
            logger: Arc::new(NoExperimentLogger),
        }
    }

    pub fn group(mut self, group: GroupId) -> Self {
        self.group = Some(group);
        self
    }

    /// Credential presented when the group restricts registration
    pub fn access_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn proposition(mut self, proposition: Proposition) -> Self {
        self.propositions.push(proposition);
        self
    }

    pub fn propositions(mut self, propositions: impl IntoIterator<Item = Proposition>) -> Self {
        self.propositions.extend(propositions);
        self
    }

    /// Members that are surveyed and whose responses count (default: everyone)
    pub fn response_scope(mut self, scope: Scope) -> Self {
        self.response_scope = scope;
        self
    }

    pub fn evaluator(mut self, evaluator: impl Evaluator + 'static) -> Self {
        self.evaluator = Some(Box::new(evaluator));
        self
    }

    /// Use a closure as the evaluator
    pub fn evaluate_with<F>(self, evaluate: F) -> Self
    where
        F: Fn(&mut ExperimentBallot<'_>, &Response) + Send + Sync + 'static,
    {
        self.evaluator(evaluate)
    }

    /// Conclude negatively if still running after `timeout`
    ///
    /// Without this the experiment runs until it is finalized or ended.
    pub fn end_after(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn on_result(mut self, callback: impl FnOnce(bool) + Send + 'static) -> Self {
        self.on_result = Some(Box::new(callback));
        self
    }

    pub fn on_outcome(
        mut self,
        callback: impl FnOnce(&ExperimentOutcome) + Send + 'static,
    ) -> Self {
        self.on_outcome = Some(Box::new(callback));
        self
    }

    pub fn logger(mut self, logger: Arc<dyn ExperimentLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Validate, register, survey and arm the timeout
    ///
    /// On success the returned experiment is already in progress and every
    /// configured proposition has been sent. On failure nothing is
    /// registered, sent or scheduled.
    pub fn execute(self) -> Result<Arc<Experiment>, LaunchError> {
        let group = self.group.ok_or(LaunchError::MissingGroup)?;
        let evaluator = self.evaluator.ok_or(LaunchError::MissingEvaluator)?;

        let experiment = Arc::new(Experiment::new(
            group.clone(),
            self.port.clone(),
            evaluator,
            self.logger.clone(),
            self.response_scope,
            self.on_result,
            self.on_outcome,
        ));

        let listener: Arc<dyn GroupListener> = experiment.clone();
        if let Err(err) = self
            .port
            .register(&group, listener, self.credential.as_ref())
        {
            warn!(group = %group, error = %err, "Experiment registration failed");
            return Err(err.into());
        }

        let surveyed = self.propositions.len();
        experiment.start(self.propositions);

        if let Some(delay) = self.timeout {
            let weak = Arc::downgrade(&experiment);
            self.scheduler.schedule_once(
                delay,
                Box::new(move || {
                    if let Some(experiment) = weak.upgrade()
                        && experiment.timeout()
                    {
                        debug!(experiment = %experiment.id(), "Experiment timed out");
                    }
                }),
            );
        }

        let timeout_ms = self
            .timeout
            .map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX));
        info!(
            experiment = %experiment.id(),
            group = %group,
            propositions = surveyed,
            timeout_ms,
            "Experiment launched"
        );
        self.logger.log(ExperimentEvent::new(
            "launched",
            json!({
                "experiment": experiment.id(),
                "group": group,
                "propositions": surveyed,
                "timeout_ms": timeout_ms,
            }),
        ));

        Ok(experiment)
    }
}
