//! Answering propositions from a knowledge base

use super::socialise::BeliefSocialisation;
use crate::ports::group::{GroupListener, PortError};
use crate::ports::knowledge::KnowledgeBase;
use poll_domain::{Address, Credential, GroupId, ParticipantId, Proposition};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Group participant that answers every proposition it receives
///
/// The answer is whatever the knowledge base can prove, sent back to the
/// proposition's source only.
pub struct BeliefResponder {
    socialisation: BeliefSocialisation,
    knowledge: Arc<dyn KnowledgeBase>,
}

impl BeliefResponder {
    pub fn new(socialisation: BeliefSocialisation, knowledge: Arc<dyn KnowledgeBase>) -> Self {
        Self {
            socialisation,
            knowledge,
        }
    }

    /// Register in `group` and start answering
    pub fn join(
        self,
        group: &GroupId,
        credential: Option<&Credential>,
    ) -> Result<Arc<Self>, PortError> {
        let responder = Arc::new(self);
        let listener: Arc<dyn GroupListener> = responder.clone();
        responder
            .socialisation
            .port()
            .register(group, listener, credential)?;
        debug!(participant = %responder.id(), group = %group, "Responder joined");
        Ok(responder)
    }

    pub fn leave(&self, group: &GroupId) -> bool {
        self.socialisation.port().unregister(group, &self.id())
    }

    pub fn socialisation(&self) -> &BeliefSocialisation {
        &self.socialisation
    }
}

impl GroupListener for BeliefResponder {
    fn id(&self) -> ParticipantId {
        self.socialisation.id()
    }

    fn on_proposition(&self, proposition: Proposition, sender: &Address) {
        if proposition.source().is_none() {
            trace!(participant = %self.id(), %sender, "Ignoring proposition without source");
            return;
        }

        let believed = self.knowledge.prove(&proposition);
        trace!(participant = %self.id(), %proposition, believed, "Answering");
        if let Err(err) = self.socialisation.answer(&proposition, believed) {
            warn!(participant = %self.id(), error = %err, "Could not answer proposition");
        }
    }
}
