//! In-process group bus: every group lives in one shared registry.
//!
//! Delivery is asynchronous: each recipient gets its own tokio task, so a
//! sender never re-enters a listener on its own call stack. This matters
//! for experiments, which send while holding their state lock.
//!
//! | Policy | `register` without credential | with unknown credential |
//! |--------|-------------------------------|-------------------------|
//! | [`AccessPolicy::Open`] | accepted | accepted |
//! | [`AccessPolicy::Restricted`] | `AccessDenied` | `AccessDenied` |

use poll_application::ports::group::{GroupListener, GroupPort, PortError};
use poll_domain::{Address, Credential, Envelope, GroupEvent, GroupId, ParticipantId, Scope};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::runtime::Handle;
use tracing::{debug, trace, warn};

/// Who may register in a group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Anyone may join
    #[default]
    Open,
    /// Only holders of one of these credentials may join
    Restricted { credentials: HashSet<Credential> },
}

impl AccessPolicy {
    pub fn restricted(credentials: impl IntoIterator<Item = Credential>) -> Self {
        AccessPolicy::Restricted {
            credentials: credentials.into_iter().collect(),
        }
    }

    pub fn admits(&self, credential: Option<&Credential>) -> bool {
        match self {
            AccessPolicy::Open => true,
            AccessPolicy::Restricted { credentials } => {
                credential.is_some_and(|c| credentials.contains(c))
            }
        }
    }
}

struct GroupState {
    policy: AccessPolicy,
    listeners: HashMap<ParticipantId, Arc<dyn GroupListener>>,
}

/// Group registry and transport for participants in one process
pub struct InProcessGroupBus {
    groups: RwLock<HashMap<GroupId, GroupState>>,
    runtime: Handle,
}

impl InProcessGroupBus {
    /// Create a bus that delivers on the given runtime
    pub fn new(runtime: Handle) -> Self {
        Self {
            groups: RwLock::new(HashMap::new()),
            runtime,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<GroupId, GroupState>> {
        self.groups.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<GroupId, GroupState>> {
        self.groups.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Create a group; returns `false` if it already exists
    pub fn create_group(&self, group: GroupId, policy: AccessPolicy) -> bool {
        let mut groups = self.write();
        if groups.contains_key(&group) {
            return false;
        }
        debug!(group = %group, restricted = !matches!(policy, AccessPolicy::Open), "Group created");
        groups.insert(
            group,
            GroupState {
                policy,
                listeners: HashMap::new(),
            },
        );
        true
    }

    /// Number of registered listeners, observers included
    pub fn listener_count(&self, group: &GroupId) -> usize {
        self.read()
            .get(group)
            .map(|state| state.listeners.len())
            .unwrap_or(0)
    }
}

impl GroupPort for InProcessGroupBus {
    fn send(&self, source: &Address, event: GroupEvent, scope: &Scope) {
        let recipients: Vec<Arc<dyn GroupListener>> = {
            let groups = self.read();
            let Some(state) = groups.get(&source.group) else {
                warn!(group = %source.group, kind = event.kind(), "Send to unknown group dropped");
                return;
            };
            state
                .listeners
                .iter()
                .filter(|(id, _)| **id != source.participant && scope.contains(id))
                .map(|(_, listener)| listener.clone())
                .collect()
        };

        trace!(
            source = %source,
            kind = event.kind(),
            recipients = recipients.len(),
            "Delivering event"
        );

        for listener in recipients {
            let envelope = Envelope::new(source.clone(), event.clone());
            self.runtime.spawn(async move {
                listener.receive(envelope);
            });
        }
    }

    fn current_members(&self, group: &GroupId) -> HashSet<ParticipantId> {
        self.read()
            .get(group)
            .map(|state| {
                state
                    .listeners
                    .iter()
                    .filter(|(_, listener)| listener.counts_as_participant())
                    .map(|(id, _)| *id)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn register(
        &self,
        group: &GroupId,
        listener: Arc<dyn GroupListener>,
        credential: Option<&Credential>,
    ) -> Result<Address, PortError> {
        let mut groups = self.write();
        let state = groups
            .get_mut(group)
            .ok_or_else(|| PortError::UnknownGroup(group.clone()))?;

        if !state.policy.admits(credential) {
            warn!(group = %group, "Registration denied");
            return Err(PortError::AccessDenied(group.clone()));
        }

        let id = listener.id();
        if state.listeners.contains_key(&id) {
            return Err(PortError::AlreadyRegistered(group.clone(), id));
        }
        state.listeners.insert(id, listener);
        debug!(group = %group, participant = %id, "Listener registered");
        Ok(Address::new(group.clone(), id))
    }

    fn unregister(&self, group: &GroupId, listener: &ParticipantId) -> bool {
        let removed = self
            .write()
            .get_mut(group)
            .is_some_and(|state| state.listeners.remove(listener).is_some());
        if removed {
            debug!(group = %group, participant = %listener, "Listener unregistered");
        }
        removed
    }

    fn address_of(&self, group: &GroupId, participant: &ParticipantId) -> Option<Address> {
        self.read()
            .get(group)
            .filter(|state| state.listeners.contains_key(participant))
            .map(|_| Address::new(group.clone(), *participant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poll_domain::{Disclosure, Proposition};
    use std::time::Duration;
    use tokio::sync::mpsc;

    struct Probe {
        id: ParticipantId,
        observer: bool,
        tx: mpsc::UnboundedSender<Envelope>,
    }

    impl Probe {
        fn new(observer: bool) -> (Arc<Self>, mpsc::UnboundedReceiver<Envelope>) {
            let (tx, rx) = mpsc::unbounded_channel();
            let probe = Arc::new(Self {
                id: ParticipantId::random(),
                observer,
                tx,
            });
            (probe, rx)
        }
    }

    impl GroupListener for Probe {
        fn id(&self) -> ParticipantId {
            self.id
        }

        fn counts_as_participant(&self) -> bool {
            !self.observer
        }

        fn receive(&self, envelope: Envelope) {
            let _ = self.tx.send(envelope);
        }
    }

    fn bus_with(group: &GroupId, policy: AccessPolicy) -> InProcessGroupBus {
        let bus = InProcessGroupBus::new(Handle::current());
        bus.create_group(group.clone(), policy);
        bus
    }

    fn council() -> GroupId {
        GroupId::new("council").unwrap()
    }

    fn raining() -> GroupEvent {
        GroupEvent::Proposition(Proposition::new("raining").unwrap())
    }

    #[tokio::test]
    async fn test_open_group_accepts_registration() {
        let group = council();
        let bus = bus_with(&group, AccessPolicy::Open);
        let (probe, _rx) = Probe::new(false);

        let address = bus.register(&group, probe.clone(), None).unwrap();

        assert_eq!(address.participant, probe.id);
        assert!(bus.is_member(&group, &probe.id));
        assert_eq!(bus.current_members(&group), HashSet::from([probe.id]));
    }

    #[tokio::test]
    async fn test_restricted_group_checks_credential() {
        let group = council();
        let bus = bus_with(&group, AccessPolicy::restricted([Credential::new("key")]));
        let (probe, _rx) = Probe::new(false);

        assert_eq!(
            bus.register(&group, probe.clone(), None),
            Err(PortError::AccessDenied(group.clone()))
        );
        assert_eq!(
            bus.register(&group, probe.clone(), Some(&Credential::new("nope"))),
            Err(PortError::AccessDenied(group.clone()))
        );
        assert!(
            bus.register(&group, probe, Some(&Credential::new("key")))
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_unknown_group_and_duplicate_registration() {
        let group = council();
        let bus = bus_with(&group, AccessPolicy::Open);
        let (probe, _rx) = Probe::new(false);
        let elsewhere = GroupId::new("elsewhere").unwrap();

        assert_eq!(
            bus.register(&elsewhere, probe.clone(), None),
            Err(PortError::UnknownGroup(elsewhere))
        );
        bus.register(&group, probe.clone(), None).unwrap();
        assert!(matches!(
            bus.register(&group, probe, None),
            Err(PortError::AlreadyRegistered(_, _))
        ));
    }

    #[tokio::test]
    async fn test_observers_are_not_members() {
        let group = council();
        let bus = bus_with(&group, AccessPolicy::Open);
        let (observer, _rx) = Probe::new(true);

        bus.register(&group, observer.clone(), None).unwrap();

        assert!(bus.current_members(&group).is_empty());
        assert!(bus.is_member(&group, &observer.id));
        assert_eq!(bus.listener_count(&group), 1);
    }

    #[tokio::test]
    async fn test_send_respects_scope_and_skips_sender() {
        let group = council();
        let bus = bus_with(&group, AccessPolicy::Open);
        let (sender, mut sender_rx) = Probe::new(false);
        let (a, mut a_rx) = Probe::new(false);
        let (b, mut b_rx) = Probe::new(false);
        let source = bus.register(&group, sender.clone(), None).unwrap();
        bus.register(&group, a.clone(), None).unwrap();
        bus.register(&group, b.clone(), None).unwrap();

        bus.send(&source, raining(), &Scope::only(a.id));

        let envelope = tokio::time::timeout(Duration::from_secs(1), a_rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(envelope.source, source);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(b_rx.try_recv().is_err());
        assert!(sender_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_reaches_everyone_else() {
        let group = council();
        let bus = bus_with(&group, AccessPolicy::Open);
        let (sender, _sender_rx) = Probe::new(false);
        let (a, mut a_rx) = Probe::new(false);
        let (b, mut b_rx) = Probe::new(true);
        let source = bus.register(&group, sender, None).unwrap();
        bus.register(&group, a, None).unwrap();
        bus.register(&group, b, None).unwrap();

        let reply = GroupEvent::Disclosure(Disclosure::new(Proposition::new("raining").unwrap(), true));
        bus.broadcast(&source, reply.clone());

        for rx in [&mut a_rx, &mut b_rx] {
            let envelope = tokio::time::timeout(Duration::from_secs(1), rx.recv())
                .await
                .unwrap()
                .unwrap();
            assert_eq!(envelope.event, reply);
        }
    }

    #[tokio::test]
    async fn test_unregister_stops_delivery() {
        let group = council();
        let bus = bus_with(&group, AccessPolicy::Open);
        let (sender, _sender_rx) = Probe::new(false);
        let (a, mut a_rx) = Probe::new(false);
        let source = bus.register(&group, sender, None).unwrap();
        bus.register(&group, a.clone(), None).unwrap();

        assert!(bus.unregister(&group, &a.id));
        assert!(!bus.unregister(&group, &a.id));
        bus.broadcast(&source, raining());

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(a_rx.try_recv().is_err());
        assert!(bus.address_of(&group, &a.id).is_none());
    }
}
