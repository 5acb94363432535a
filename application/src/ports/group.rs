//! Group-communication port
//!
//! Abstracts the substrate that carries propositions, disclosures and
//! announcements between participants: membership, addressing, scoped send
//! and access-controlled registration.
//!
//! # Architecture
//!
//! Following the Ports and Adapters pattern:
//! - **Port**: [`GroupPort`] and [`GroupListener`] - defined here
//! - **Adapter**: `InProcessGroupBus` - implemented in the infrastructure layer
//!
//! Any transport (in-process channels, network pub/sub) can satisfy it.

use poll_domain::{
    Address, ContestAnnouncement, Credential, Envelope, GroupEvent, GroupId, ParticipantId,
    Proposition, Response, Scope,
};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Errors reported by a group-communication port
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortError {
    #[error("Access to group '{0}' denied")]
    AccessDenied(GroupId),

    #[error("Unknown group: {0}")]
    UnknownGroup(GroupId),

    #[error("Listener {1} is already registered in group '{0}'")]
    AlreadyRegistered(GroupId, ParticipantId),
}

/// Something that can be registered in a group and receive its events
///
/// Implementors normally override only the handlers they care about;
/// [`receive`](Self::receive) dispatches by event type.
pub trait GroupListener: Send + Sync {
    /// Identity under which the listener is registered
    fn id(&self) -> ParticipantId;

    /// Whether this listener is a group participant
    ///
    /// Observers (such as running experiments) return `false` and are not
    /// reported by [`GroupPort::current_members`], so they never count
    /// towards a tally.
    fn counts_as_participant(&self) -> bool {
        true
    }

    /// Entry point called by the transport for every delivered event
    fn receive(&self, envelope: Envelope) {
        if matches!(envelope.event, GroupEvent::Disclosure(_)) {
            if let Some(response) = envelope.into_response() {
                self.on_response(response);
            }
            return;
        }
        let Envelope { source, event } = envelope;
        match event {
            GroupEvent::Proposition(proposition) => self.on_proposition(proposition, &source),
            GroupEvent::Announcement(announcement) => self.on_announcement(announcement, &source),
            GroupEvent::Disclosure(_) => {}
        }
    }

    fn on_response(&self, _response: Response) {}

    fn on_proposition(&self, _proposition: Proposition, _source: &Address) {}

    fn on_announcement(&self, _announcement: ContestAnnouncement, _source: &Address) {}
}

/// Port for the group-communication substrate
pub trait GroupPort: Send + Sync {
    /// Emit an event from `source` to the members of `source.group` in `scope`
    ///
    /// Delivery must not re-enter the sender on the calling thread:
    /// experiments send while holding their own lock. The sender itself is
    /// never a recipient.
    fn send(&self, source: &Address, event: GroupEvent, scope: &Scope);

    /// Emit an event from `source` to every member of its group
    fn broadcast(&self, source: &Address, event: GroupEvent) {
        self.send(source, event, &Scope::All);
    }

    /// Participants currently registered in the group (observers excluded)
    fn current_members(&self, group: &GroupId) -> HashSet<ParticipantId>;

    /// Register a listener, presenting a credential if the group is restricted
    ///
    /// Open groups accept any registration. Restricted groups reject a
    /// missing or unknown credential with [`PortError::AccessDenied`].
    fn register(
        &self,
        group: &GroupId,
        listener: Arc<dyn GroupListener>,
        credential: Option<&Credential>,
    ) -> Result<Address, PortError>;

    /// Remove a listener; returns `true` if it was registered
    fn unregister(&self, group: &GroupId, listener: &ParticipantId) -> bool;

    /// Address of a registered listener, if any
    fn address_of(&self, group: &GroupId, participant: &ParticipantId) -> Option<Address>;

    fn is_member(&self, group: &GroupId, participant: &ParticipantId) -> bool {
        self.address_of(group, participant).is_some()
    }
}
