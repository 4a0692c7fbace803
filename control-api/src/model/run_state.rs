//! Run / emergency-halt state of the trading system.
//!
//! The dashboard shows two flags, `isSystemRunning` and `emergencyStop`. They are
//! folded into one three-state enum here, which makes "running while halted"
//! unrepresentable.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Engine idle, no emergency latched.
    #[default]
    Stopped,
    /// Engine actively operating.
    Running,
    /// Emergency stop latched. Only an explicit start clears it.
    EmergencyHalted,
}

impl RunState {
    /// `isSystemRunning` as seen by the UI.
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }

    /// `emergencyStop` as seen by the UI.
    pub fn is_emergency_stopped(&self) -> bool {
        matches!(self, RunState::EmergencyHalted)
    }

    /// State reached by `setSystemRunning(running)`.
    ///
    /// Starting always lands in `Running` and drops any latched emergency.
    /// Stopping never clears a latched emergency.
    pub fn with_running(self, running: bool) -> RunState {
        match (running, self) {
            (true, _) => RunState::Running,
            (false, RunState::EmergencyHalted) => RunState::EmergencyHalted,
            (false, _) => RunState::Stopped,
        }
    }

    /// Rebuilds the state from the UI flag pair.
    ///
    /// # Returns
    ///
    /// * `None` if both flags are set, which no store ever produces.
    pub fn from_flags(is_system_running: bool, emergency_stop: bool) -> Option<RunState> {
        match (is_system_running, emergency_stop) {
            (false, false) => Some(RunState::Stopped),
            (true, false) => Some(RunState::Running),
            (false, true) => Some(RunState::EmergencyHalted),
            (true, true) => None,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Stopped => write!(f, "Stopped"),
            RunState::Running => write!(f, "Running"),
            RunState::EmergencyHalted => write!(f, "EmergencyHalted"),
        }
    }
}
