use super::ControlState;

/// Handle returned by [`ControlStore::subscribe`](super::ControlStore::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type Listener = Box<dyn FnMut(&ControlState) + Send>;

/// Ordered set of change listeners.
///
/// Listeners are invoked in the order they subscribed.
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Subscribers {
    pub(crate) fn add(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub(crate) fn notify(&mut self, state: &ControlState) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(state);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}
