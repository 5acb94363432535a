//! Disclosures, responses and the events a group carries

use super::proposition::Proposition;
use crate::core::identity::{Address, ParticipantId};
use crate::experiment::announcement::ContestAnnouncement;
use serde::{Deserialize, Serialize};

/// A participant's answer to a proposition, as sent over the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disclosure {
    pub proposition: Proposition,
    pub believed: bool,
}

impl Disclosure {
    pub fn new(proposition: Proposition, believed: bool) -> Self {
        Self {
            proposition,
            believed,
        }
    }
}

/// Messages that travel through a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GroupEvent {
    Proposition(Proposition),
    Disclosure(Disclosure),
    Announcement(ContestAnnouncement),
}

impl GroupEvent {
    /// Short event name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            GroupEvent::Proposition(_) => "proposition",
            GroupEvent::Disclosure(_) => "disclosure",
            GroupEvent::Announcement(_) => "announcement",
        }
    }
}

/// A delivered event together with the transport address it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub source: Address,
    pub event: GroupEvent,
}

impl Envelope {
    pub fn new(source: Address, event: GroupEvent) -> Self {
        Self { source, event }
    }

    /// Interpret this envelope as a [`Response`], if it carries a disclosure
    ///
    /// The respondent is taken from the transport-level source address,
    /// never from anything the sender wrote into the payload.
    pub fn into_response(self) -> Option<Response> {
        match self.event {
            GroupEvent::Disclosure(disclosure) => Some(Response {
                proposition: disclosure.proposition,
                believed: disclosure.believed,
                respondent: self.source.participant,
            }),
            _ => None,
        }
    }
}

/// A disclosure correlated with the participant that sent it
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    proposition: Proposition,
    believed: bool,
    respondent: ParticipantId,
}

impl Response {
    pub fn new(proposition: Proposition, believed: bool, respondent: ParticipantId) -> Self {
        Self {
            proposition,
            believed,
            respondent,
        }
    }

    pub fn proposition(&self) -> &Proposition {
        &self.proposition
    }

    pub fn believed(&self) -> bool {
        self.believed
    }

    pub fn respondent(&self) -> ParticipantId {
        self.respondent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::GroupId;

    fn address() -> Address {
        Address::new(GroupId::new("g").unwrap(), ParticipantId::random())
    }

    #[test]
    fn test_envelope_into_response_uses_transport_source() {
        let source = address();
        let p = Proposition::new("raining").unwrap();
        let envelope = Envelope::new(
            source.clone(),
            GroupEvent::Disclosure(Disclosure::new(p.clone(), true)),
        );

        let response = envelope.into_response().unwrap();
        assert_eq!(response.respondent(), source.participant);
        assert_eq!(response.proposition(), &p);
        assert!(response.believed());
    }

    #[test]
    fn test_non_disclosure_is_not_a_response() {
        let p = Proposition::new("raining").unwrap();
        let envelope = Envelope::new(address(), GroupEvent::Proposition(p));
        assert!(envelope.into_response().is_none());
    }

    #[test]
    fn test_event_kind_and_tag() {
        let p = Proposition::new("raining").unwrap();
        let event = GroupEvent::Proposition(p);
        assert_eq!(event.kind(), "proposition");

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "proposition");
    }
}
