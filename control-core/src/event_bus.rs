//! # Snapshot Bus
//!
//! Bridges the synchronous store listeners to async consumers.
//!
//! The store calls its listeners inline, under whatever lock guards it. A
//! WebSocket session can't do that: it lives on its own task and awaits the
//! network. The bus is a listener that copies each new state into a tokio
//! broadcast channel, and sessions read from that channel at their own pace.

use control::ControlSnapshot;
use tokio::sync::broadcast;

use crate::store::{ControlState, ControlStore, SubscriptionId};

/// A wrapper around a tokio broadcast channel of store snapshots.
#[derive(Clone)]
pub struct SnapshotBus {
    sender: broadcast::Sender<ControlSnapshot>,
}

impl SnapshotBus {
    /// Creates a new bus.
    ///
    /// A receiver more than `capacity` snapshots behind skips ahead (Lagging).
    /// Only the latest snapshot matters to a dashboard, so that is harmless.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes a snapshot to all subscribers.
    pub fn publish(&self, snapshot: ControlSnapshot) {
        // No receivers yet is fine
        let _ = self.sender.send(snapshot);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ControlSnapshot> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Registers the bus as a listener on `store`.
    pub fn attach(&self, store: &mut ControlStore) -> SubscriptionId {
        let bus = self.clone();
        store.subscribe(move |state: &ControlState| bus.publish(state.snapshot()))
    }
}

impl Default for SnapshotBus {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_attached_bus_forwards_every_mutation() {
        let bus = SnapshotBus::new(16);
        let mut rx = bus.subscribe();
        let mut store = ControlStore::new();
        bus.attach(&mut store);

        store.set_system_running(true);
        store.trigger_emergency_stop();

        let first = rx.recv().await.unwrap();
        assert!(first.is_system_running);
        assert!(first.notifications.is_empty());

        let second = rx.recv().await.unwrap();
        assert!(!second.is_system_running);
        assert!(second.emergency_stop);
        assert_eq!(second.notifications.len(), 1);
    }

    #[tokio::test]
    async fn test_slow_receiver_lags_instead_of_blocking() {
        let bus = SnapshotBus::new(2);
        let mut rx = bus.subscribe();
        let mut store = ControlStore::new();
        bus.attach(&mut store);

        for _ in 0..5 {
            store.set_system_running(true);
        }

        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Lagged(_))
        ));
        assert!(rx.recv().await.unwrap().is_system_running);
    }

    #[test]
    fn test_publish_without_receivers() {
        let bus = SnapshotBus::default();
        bus.publish(ControlSnapshot::default());
        assert_eq!(bus.receiver_count(), 0);
    }
}
