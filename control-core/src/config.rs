//! Layered dashboard configuration.
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults ([`DashboardConfig::default`]).
//! 2. A config file, `config/dashboard.{toml,json,yaml}` unless `--config` names one.
//! 3. `DASHBOARD_*` environment variables, e.g. `DASHBOARD_PORT=4000`.
//! 4. Command-line flags ([`CommonArgs`]).

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::args::CommonArgs;
use crate::error::Result;
use crate::store::ids::IdScheme;

pub const DEFAULT_CONFIG_PATH: &str = "config/dashboard";
pub const ENV_PREFIX: &str = "DASHBOARD";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub bind_address: String,
    pub port: u16,
    pub log_level: String,

    /// Notification id generator.
    pub id_scheme: IdScheme,
    /// Snapshot bus capacity per WebSocket receiver.
    pub event_buffer: usize,
    /// Allow any origin (the UI dev server runs on another port).
    pub cors_permissive: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            id_scheme: IdScheme::Sequential,
            event_buffer: 100,
            cors_permissive: true,
        }
    }
}

impl DashboardConfig {
    /// Loads the file and environment layers.
    ///
    /// # Arguments
    ///
    /// * `path` - An explicit config file. It must exist. With `None`, the
    ///   default location is tried and silently skipped if absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => File::with_name(&p.to_string_lossy()).required(true),
            None => File::with_name(DEFAULT_CONFIG_PATH).required(false),
        };

        let config = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Loads every layer including command-line overrides.
    pub fn from_args(args: &CommonArgs) -> Result<Self> {
        let mut config = Self::load(args.get_config_path().map(|p| p.as_path()))?;
        config.apply_args(args);
        Ok(config)
    }

    pub fn apply_args(&mut self, args: &CommonArgs) {
        if let Some(addr) = args.get_bind_address() {
            self.bind_address = addr.to_string();
        }
        if let Some(port) = args.get_port() {
            self.port = port;
        }
        if let Some(level) = args.get_log_level() {
            self.log_level = level.to_string();
        }
        if let Some(scheme) = args.get_id_scheme() {
            self.id_scheme = scheme;
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
