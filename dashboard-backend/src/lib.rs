//! # Dashboard Backend
//!
//! HTTP and WebSocket surface of the control store.
//!
//! ## Modules
//! - `api`: Router, shared `AppState` and the REST handlers.
//! - `ws`: WebSocket sessions fed by the snapshot bus.

pub mod api;
pub mod ws;

pub use api::{build_router, AppState};
