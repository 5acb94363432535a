//! Observer that collects contest announcements for display

use poll_application::GroupListener;
use poll_domain::{Address, ContestAnnouncement, ParticipantId};
use std::sync::Mutex;
use tokio::sync::mpsc;

/// Non-participating group member that forwards every announcement it hears
///
/// Registered next to the local participants so the CLI can show contest
/// winners. It never answers propositions and is not counted in tallies.
pub struct Audience {
    id: ParticipantId,
    announcements: mpsc::UnboundedSender<ContestAnnouncement>,
    received: Mutex<Vec<Address>>,
}

impl Audience {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ContestAnnouncement>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let audience = Self {
            id: ParticipantId::random(),
            announcements: tx,
            received: Mutex::new(Vec::new()),
        };
        (audience, rx)
    }

    /// Sources of the announcements heard so far
    pub fn announcers(&self) -> Vec<Address> {
        self.received
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl GroupListener for Audience {
    fn id(&self) -> ParticipantId {
        self.id
    }

    fn counts_as_participant(&self) -> bool {
        false
    }

    fn on_announcement(&self, announcement: ContestAnnouncement, source: &Address) {
        self.received
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(source.clone());
        // The receiver is dropped once the CLI has printed its report
        let _ = self.announcements.send(announcement);
    }
}
