//! # Control-State Store
//!
//! The single owner of the trading system's run / emergency-stop state, the
//! logged-in user and the notification feed.
//!
//! ## Mutation surface
//! Six operations are the only way to change anything:
//! [`set_system_running`](ControlStore::set_system_running),
//! [`trigger_emergency_stop`](ControlStore::trigger_emergency_stop),
//! [`set_current_user`](ControlStore::set_current_user),
//! [`add_notification`](ControlStore::add_notification),
//! [`mark_notification_read`](ControlStore::mark_notification_read) and
//! [`clear_notifications`](ControlStore::clear_notifications).
//!
//! Every mutator takes `&mut self` and completes its whole update before the
//! subscribed listeners run, so nobody ever sees a half-applied transition.
//! None of them can fail.
//!
//! # Examples
//!
//! ```
//! use control_core::ControlStore;
//!
//! let mut store = ControlStore::new();
//! store.set_system_running(true);
//! store.trigger_emergency_stop();
//! assert!(!store.is_system_running());
//! assert!(store.emergency_stop());
//! assert_eq!(store.notifications().len(), 1);
//! ```

pub mod clock;
pub mod ids;
mod subscription;

use control::{
    Clock, ControlSnapshot, IdSource, Notification, NotificationDraft, NotificationKind, RunState,
    User,
};
use log::{debug, info, warn};
use std::collections::VecDeque;
use std::fmt;

use clock::SystemClock;
use ids::{IdScheme, SequentialIds};
use subscription::Subscribers;

pub use subscription::{Listener, SubscriptionId};

pub const EMERGENCY_STOP_TITLE: &str = "紧急停止";
pub const EMERGENCY_STOP_MESSAGE: &str = "系统已执行紧急停止操作";

/// The data owned by the store.
///
/// Listeners receive a shared reference to it after each mutation. Use
/// [`snapshot`](ControlState::snapshot) for an owned copy in UI wire shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlState {
    run: RunState,
    current_user: Option<User>,
    /// Newest first.
    notifications: VecDeque<Notification>,
}

impl ControlState {
    pub fn run_state(&self) -> RunState {
        self.run
    }

    pub fn is_system_running(&self) -> bool {
        self.run.is_running()
    }

    pub fn emergency_stop(&self) -> bool {
        self.run.is_emergency_stopped()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    /// Notifications in display order, newest first.
    pub fn notifications(&self) -> impl ExactSizeIterator<Item = &Notification> + '_ {
        self.notifications.iter()
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read()).count()
    }

    pub fn snapshot(&self) -> ControlSnapshot {
        ControlSnapshot {
            is_system_running: self.is_system_running(),
            emergency_stop: self.emergency_stop(),
            current_user: self.current_user.clone(),
            notifications: self.notifications.iter().cloned().collect(),
        }
    }
}

pub struct ControlStore {
    state: ControlState,
    ids: Box<dyn IdSource>,
    clock: Box<dyn Clock>,
    subscribers: Subscribers,
}

impl ControlStore {
    /// Creates a store in the initial state: `Stopped`, no user, empty feed.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> ControlStoreBuilder {
        ControlStoreBuilder::default()
    }

    // --- Read interface ---

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    pub fn snapshot(&self) -> ControlSnapshot {
        self.state.snapshot()
    }

    pub fn run_state(&self) -> RunState {
        self.state.run_state()
    }

    pub fn is_system_running(&self) -> bool {
        self.state.is_system_running()
    }

    pub fn emergency_stop(&self) -> bool {
        self.state.emergency_stop()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.state.current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    /// Notifications in display order, newest first.
    pub fn notifications(&self) -> Vec<&Notification> {
        self.state.notifications().collect()
    }

    pub fn unread_count(&self) -> usize {
        self.state.unread_count()
    }

    // --- Subscription ---

    /// Registers a listener called synchronously after every mutator.
    ///
    /// Listeners also fire for mutators that turned out to change nothing,
    /// such as marking an unknown id as read.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&ControlState) + Send + 'static,
    {
        self.subscribers.add(Box::new(listener))
    }

    /// # Returns
    ///
    /// * `true` if the listener was registered and is now removed.
    /// * `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    // --- Mutators ---

    /// Starts or stops the trading system.
    ///
    /// `true` always lands in `Running` and clears a latched emergency stop.
    /// `false` leaves a latched emergency stop in place.
    pub fn set_system_running(&mut self, running: bool) {
        let from = self.state.run;
        let to = from.with_running(running);
        self.state.run = to;
        if from != to {
            debug!("Run state {} -> {}", from, to);
        }
        self.publish();
    }

    /// Latches the emergency stop from any state.
    ///
    /// Every call appends an `error` notification, including repeat calls
    /// while already halted.
    pub fn trigger_emergency_stop(&mut self) {
        let from = self.state.run;
        warn!("Emergency stop triggered (was {})", from);

        let notification = self.materialize(NotificationDraft::new(
            NotificationKind::Error,
            EMERGENCY_STOP_TITLE,
            EMERGENCY_STOP_MESSAGE,
        ));
        self.state.run = RunState::EmergencyHalted;
        self.state.notifications.push_front(notification);
        self.publish();
    }

    /// Replaces the current user. `None` logs out.
    pub fn set_current_user(&mut self, user: Option<User>) {
        match &user {
            Some(u) => info!("User '{}' ({}) logged in", u.username(), u.role()),
            None => {
                if let Some(previous) = &self.state.current_user {
                    info!("User '{}' logged out", previous.username());
                }
            }
        }
        self.state.current_user = user;
        self.publish();
    }

    /// Prepends a new unread notification and returns a copy of it.
    pub fn add_notification(&mut self, draft: NotificationDraft) -> Notification {
        let notification = self.materialize(draft);
        debug!(
            "Notification {} [{}] {}",
            notification.id(),
            notification.kind(),
            notification.title()
        );
        self.state.notifications.push_front(notification.clone());
        self.publish();
        notification
    }

    /// Marks one notification as read.
    ///
    /// # Returns
    ///
    /// * `true` if a notification with `id` exists.
    /// * `false` otherwise, with the feed left untouched.
    pub fn mark_notification_read(&mut self, id: &str) -> bool {
        let found = match self.state.notifications.iter_mut().find(|n| n.id() == id) {
            Some(n) => {
                n.mark_read();
                true
            }
            None => {
                debug!("mark_notification_read: no notification with id {}", id);
                false
            }
        };
        self.publish();
        found
    }

    pub fn clear_notifications(&mut self) {
        debug!("Clearing {} notifications", self.state.notifications.len());
        self.state.notifications.clear();
        self.publish();
    }

    fn materialize(&mut self, draft: NotificationDraft) -> Notification {
        Notification::from_draft(self.ids.next_id(), draft, self.clock.now())
    }

    fn publish(&mut self) {
        self.subscribers.notify(&self.state);
    }
}

impl Default for ControlStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ControlStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlStore")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Builds a [`ControlStore`] with custom id and time sources.
pub struct ControlStoreBuilder {
    ids: Box<dyn IdSource>,
    clock: Box<dyn Clock>,
}

impl Default for ControlStoreBuilder {
    fn default() -> Self {
        Self {
            ids: Box::new(SequentialIds::default()),
            clock: Box::new(SystemClock),
        }
    }
}

impl ControlStoreBuilder {
    pub fn with_id_source(mut self, ids: impl IdSource + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_id_scheme(mut self, scheme: IdScheme) -> Self {
        self.ids = scheme.source();
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn build(self) -> ControlStore {
        ControlStore {
            state: ControlState::default(),
            ids: self.ids,
            clock: self.clock,
            subscribers: Subscribers::default(),
        }
    }
}
