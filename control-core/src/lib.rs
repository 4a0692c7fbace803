//! # Control Core Library
//!
//! The control plane behind the trading operations dashboard.
//!
//! ## Modules
//! - `store`: The control-state store (run / emergency flags, current user, notification feed).
//! - `event_bus`: Async fan-out of store snapshots to WebSocket clients.
//! - `config`: Layered dashboard configuration (defaults, file, environment, CLI).
//! - `args`: Standardized command-line arguments.
//! - `logging`: One-shot `env_logger` initialization.
//! - `error`: Error type for the fallible outer layers.

pub mod args;
pub mod config;
pub mod error;
pub mod event_bus;
pub mod logging;
pub mod store;

pub use error::{DashboardError, Result};
pub use store::{ControlState, ControlStore, ControlStoreBuilder, SubscriptionId};
