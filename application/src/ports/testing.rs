//! In-memory port doubles shared by the application-layer tests

use super::experiment_logger::{ExperimentEvent, ExperimentLogger};
use super::group::{GroupListener, GroupPort, PortError};
use super::scheduler::{TimeoutScheduler, TimeoutTask};
use poll_domain::{Address, Credential, GroupEvent, GroupId, ParticipantId, Scope};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Group port that records sends instead of delivering them
///
/// Tests drive delivery by calling `receive` on the experiment directly,
/// which keeps interleavings deterministic.
pub(crate) struct FakeGroup {
    group: GroupId,
    credential: Option<Credential>,
    members: Mutex<HashSet<ParticipantId>>,
    listeners: Mutex<HashMap<ParticipantId, Arc<dyn GroupListener>>>,
    sent: Mutex<Vec<(Address, GroupEvent, Scope)>>,
}

impl FakeGroup {
    pub(crate) fn open(group: &str) -> Arc<Self> {
        Arc::new(Self::with_policy(group, None))
    }

    pub(crate) fn restricted(group: &str, credential: Credential) -> Arc<Self> {
        Arc::new(Self::with_policy(group, Some(credential)))
    }

    fn with_policy(group: &str, credential: Option<Credential>) -> Self {
        Self {
            group: GroupId::new(group).unwrap(),
            credential,
            members: Mutex::new(HashSet::new()),
            listeners: Mutex::new(HashMap::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn group(&self) -> GroupId {
        self.group.clone()
    }

    /// Add a participant that is a member without a listener behind it
    pub(crate) fn add_member(&self) -> ParticipantId {
        let id = ParticipantId::random();
        self.members.lock().unwrap().insert(id);
        id
    }

    pub(crate) fn remove_member(&self, id: &ParticipantId) {
        self.members.lock().unwrap().remove(id);
    }

    pub(crate) fn sent(&self) -> Vec<(Address, GroupEvent, Scope)> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn is_registered(&self, id: &ParticipantId) -> bool {
        self.listeners.lock().unwrap().contains_key(id)
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }
}

impl GroupPort for FakeGroup {
    fn send(&self, source: &Address, event: GroupEvent, scope: &Scope) {
        self.sent
            .lock()
            .unwrap()
            .push((source.clone(), event, scope.clone()));
    }

    fn current_members(&self, group: &GroupId) -> HashSet<ParticipantId> {
        if group != &self.group {
            return HashSet::new();
        }
        let mut members = self.members.lock().unwrap().clone();
        for (id, listener) in self.listeners.lock().unwrap().iter() {
            if listener.counts_as_participant() {
                members.insert(*id);
            }
        }
        members
    }

    fn register(
        &self,
        group: &GroupId,
        listener: Arc<dyn GroupListener>,
        credential: Option<&Credential>,
    ) -> Result<Address, PortError> {
        if group != &self.group {
            return Err(PortError::UnknownGroup(group.clone()));
        }
        if let Some(required) = &self.credential
            && credential != Some(required)
        {
            return Err(PortError::AccessDenied(group.clone()));
        }
        let id = listener.id();
        self.listeners.lock().unwrap().insert(id, listener);
        Ok(Address::new(group.clone(), id))
    }

    fn unregister(&self, _group: &GroupId, listener: &ParticipantId) -> bool {
        self.listeners.lock().unwrap().remove(listener).is_some()
    }

    fn address_of(&self, group: &GroupId, participant: &ParticipantId) -> Option<Address> {
        let known = self.listeners.lock().unwrap().contains_key(participant)
            || self.members.lock().unwrap().contains(participant);
        (group == &self.group && known).then(|| Address::new(group.clone(), *participant))
    }
}

/// Scheduler that holds tasks until the test fires them
#[derive(Default)]
pub(crate) struct ManualScheduler {
    tasks: Mutex<Vec<(Duration, TimeoutTask)>>,
}

impl ManualScheduler {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn scheduled(&self) -> Vec<Duration> {
        self.tasks.lock().unwrap().iter().map(|(d, _)| *d).collect()
    }

    pub(crate) fn fire_all(&self) {
        let tasks: Vec<_> = self.tasks.lock().unwrap().drain(..).collect();
        for (_, task) in tasks {
            task();
        }
    }
}

impl TimeoutScheduler for ManualScheduler {
    fn schedule_once(&self, delay: Duration, task: TimeoutTask) {
        self.tasks.lock().unwrap().push((delay, task));
    }
}

/// Logger that keeps every event type in order
#[derive(Default)]
pub(crate) struct RecordingLogger {
    events: Mutex<Vec<(&'static str, serde_json::Value)>>,
}

impl RecordingLogger {
    pub(crate) fn types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }

    pub(crate) fn payloads(&self, event_type: &str) -> Vec<serde_json::Value> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, _)| *t == event_type)
            .map(|(_, payload)| payload.clone())
            .collect()
    }
}

impl ExperimentLogger for RecordingLogger {
    fn log(&self, event: ExperimentEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type, event.payload));
    }
}
