//! Belief socialisation use case
//!
//! The participant-facing side of polling: asking and telling peers,
//! answering their questions, and launching polls on one's own behalf.

use crate::experiment::{Experiment, ExperimentBuilder, LaunchError};
use crate::ports::experiment_logger::{ExperimentLogger, NoExperimentLogger};
use crate::ports::group::GroupPort;
use crate::ports::scheduler::TimeoutScheduler;
use crate::strategies;
use poll_domain::{
    Address, Credential, Disclosure, GroupEvent, GroupId, ParticipantId, Proposition, Scope,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while socialising beliefs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SocialiseError {
    #[error("Participant {1} is not a member of group '{0}'")]
    NotAMember(GroupId, ParticipantId),

    #[error("Proposition has no source to reply to")]
    MissingSource,

    #[error("Poll could not be launched: {0}")]
    Launch(#[from] LaunchError),
}

/// Belief socialisation on behalf of one participant
pub struct BeliefSocialisation {
    id: ParticipantId,
    port: Arc<dyn GroupPort>,
    scheduler: Arc<dyn TimeoutScheduler>,
    credential: Option<Credential>,
    logger: Arc<dyn ExperimentLogger>,
}

impl BeliefSocialisation {
    pub fn new(
        id: ParticipantId,
        port: Arc<dyn GroupPort>,
        scheduler: Arc<dyn TimeoutScheduler>,
    ) -> Self {
        Self {
            id,
            port,
            scheduler,
            credential: None,
            logger: Arc::new(NoExperimentLogger),
        }
    }

    /// Credential presented by polls launched into restricted groups
    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ExperimentLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn id(&self) -> ParticipantId {
        self.id
    }

    pub fn port(&self) -> &Arc<dyn GroupPort> {
        &self.port
    }

    fn address_in(&self, group: &GroupId) -> Result<Address, SocialiseError> {
        self.port
            .address_of(group, &self.id)
            .ok_or_else(|| SocialiseError::NotAMember(group.clone(), self.id))
    }

    /// Ask `scope` of `group` about a proposition; answers come back to us
    pub fn ask_in(
        &self,
        group: &GroupId,
        scope: &Scope,
        proposition: Proposition,
    ) -> Result<(), SocialiseError> {
        let address = self.address_in(group)?;
        let proposition = proposition.with_source(address.clone());
        debug!(participant = %self.id, group = %group, %proposition, "Asking");
        self.port
            .send(&address, GroupEvent::Proposition(proposition), scope);
        Ok(())
    }

    /// Disclose a belief to `scope` of `group`
    pub fn tell_in(
        &self,
        group: &GroupId,
        scope: &Scope,
        disclosure: Disclosure,
    ) -> Result<(), SocialiseError> {
        let address = self.address_in(group)?;
        debug!(
            participant = %self.id,
            group = %group,
            proposition = %disclosure.proposition,
            believed = disclosure.believed,
            "Telling"
        );
        self.port
            .send(&address, GroupEvent::Disclosure(disclosure), scope);
        Ok(())
    }

    /// Reply to whoever issued `proposition`
    pub fn answer(&self, proposition: &Proposition, believed: bool) -> Result<(), SocialiseError> {
        let source = proposition.source().ok_or(SocialiseError::MissingSource)?;
        self.tell_in(
            &source.group,
            &Scope::only(source.participant),
            Disclosure::new(proposition.clone(), believed),
        )
    }

    /// Builder pre-filled with this participant's credential and logger
    pub fn poll(&self, group: GroupId, scope: Scope) -> ExperimentBuilder {
        let builder = ExperimentBuilder::new(self.port.clone(), self.scheduler.clone())
            .group(group)
            .response_scope(scope)
            .logger(self.logger.clone());
        match &self.credential {
            Some(credential) => builder.access_credential(credential.clone()),
            None => builder,
        }
    }

    pub fn is_believed_by_all(
        &self,
        group: GroupId,
        scope: Scope,
        proposition: Proposition,
        timeout: Option<Duration>,
        on_result: impl FnOnce(bool) + Send + 'static,
    ) -> Result<Arc<Experiment>, SocialiseError> {
        let builder = self.bounded(group, scope, timeout);
        Ok(strategies::is_believed_by_all(builder, proposition, on_result)?)
    }

    pub fn is_believed_by_any(
        &self,
        group: GroupId,
        scope: Scope,
        proposition: Proposition,
        timeout: Option<Duration>,
        on_result: impl FnOnce(bool) + Send + 'static,
    ) -> Result<Arc<Experiment>, SocialiseError> {
        let builder = self.bounded(group, scope, timeout);
        Ok(strategies::is_believed_by_any(builder, proposition, on_result)?)
    }

    pub fn is_believed_by_none(
        &self,
        group: GroupId,
        scope: Scope,
        proposition: Proposition,
        timeout: Option<Duration>,
        on_result: impl FnOnce(bool) + Send + 'static,
    ) -> Result<Arc<Experiment>, SocialiseError> {
        let builder = self.bounded(group, scope, timeout);
        Ok(strategies::is_believed_by_none(builder, proposition, on_result)?)
    }

    fn bounded(&self, group: GroupId, scope: Scope, timeout: Option<Duration>) -> ExperimentBuilder {
        let builder = self.poll(group, scope);
        match timeout {
            Some(timeout) => builder.end_after(timeout),
            None => builder,
        }
    }
}
