use serde::{Deserialize, Serialize};

use super::identity::User;
use super::notification::Notification;
use super::run_state::RunState;

/// Point-in-time copy of the control store, in the shape the dashboard reads.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlSnapshot {
    pub is_system_running: bool,
    pub emergency_stop: bool,
    pub current_user: Option<User>,
    /// Newest first.
    pub notifications: Vec<Notification>,
}

impl ControlSnapshot {
    /// The run state encoded by the two flags, `None` if they contradict.
    pub fn run_state(&self) -> Option<RunState> {
        RunState::from_flags(self.is_system_running, self.emergency_stop)
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read()).count()
    }
}
