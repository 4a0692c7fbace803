use chrono::{DateTime, Utc};

/// Source of creation timestamps for notifications.
pub trait Clock: Send {
    fn now(&self) -> DateTime<Utc>;
}
