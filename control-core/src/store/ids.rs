//! Notification id generators.

use control::IdSource;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::DashboardError;

/// Shared by every `SequentialIds`, so two stores in one process never collide.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Time-ordered ids of the form `<prefix>-<unix millis>-<seq>`.
///
/// The millisecond part keeps ids roughly sortable by creation time. The
/// sequence part makes them unique even when several are issued in the same
/// millisecond.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("ntf")
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let millis = chrono::Utc::now().timestamp_millis();
        format!("{}-{}-{}", self.prefix, millis, seq)
    }
}

/// Random UUID v4 ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Which generator a store is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    #[default]
    Sequential,
    Uuid,
}

impl IdScheme {
    pub fn source(&self) -> Box<dyn IdSource> {
        match self {
            IdScheme::Sequential => Box::new(SequentialIds::default()),
            IdScheme::Uuid => Box::new(UuidIds),
        }
    }
}

impl fmt::Display for IdScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdScheme::Sequential => write!(f, "sequential"),
            IdScheme::Uuid => write!(f, "uuid"),
        }
    }
}

impl FromStr for IdScheme {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" => Ok(IdScheme::Sequential),
            "uuid" => Ok(IdScheme::Uuid),
            _ => Err(DashboardError::InvalidIdScheme(s.to_string())),
        }
    }
}
