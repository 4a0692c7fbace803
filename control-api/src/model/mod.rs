//! Data types shared by the control store, the dashboard backend and its clients.
//!
//! Field names are serialized the way the dashboard UI reads them, so the same
//! JSON shape flows from the store to the browser and back to the controller.
//!
//! # Submodules
//! - [`identity`]: The authenticated dashboard user and their role.
//! - [`notification`]: Feed items and the caller-supplied draft.
//! - [`run_state`]: The run / emergency-halt state machine.
//! - [`snapshot`]: The read-only view pushed to subscribers.

pub mod identity;
pub mod notification;
pub mod run_state;
pub mod snapshot;
