use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a feed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Warning,
    Error,
    Success,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Info => write!(f, "info"),
            NotificationKind::Warning => write!(f, "warning"),
            NotificationKind::Error => write!(f, "error"),
            NotificationKind::Success => write!(f, "success"),
        }
    }
}

impl std::str::FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(NotificationKind::Info),
            "warning" => Ok(NotificationKind::Warning),
            "error" => Ok(NotificationKind::Error),
            "success" => Ok(NotificationKind::Success),
            other => Err(format!("unknown notification type '{}'", other)),
        }
    }
}

/// The caller-supplied part of a notification.
///
/// The store fills in `id`, `timestamp` and `read` when the draft is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationDraft {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl NotificationDraft {
    pub fn new(
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// A fully formed feed item.
///
/// Only `read` may change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: String,
    #[serde(rename = "type")]
    kind: NotificationKind,
    title: String,
    message: String,
    timestamp: DateTime<Utc>,
    read: bool,
}

impl Notification {
    /// Materializes a draft into an unread notification.
    ///
    /// # Arguments
    ///
    /// * `id` - Unique id issued by the store's id source.
    /// * `draft` - Type, title and message from the caller.
    /// * `timestamp` - Creation instant.
    pub fn from_draft(id: String, draft: NotificationDraft, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            kind: draft.kind,
            title: draft.title,
            message: draft.message,
            timestamp,
            read: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    pub fn mark_read(&mut self) {
        self.read = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_from_draft_starts_unread() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let draft = NotificationDraft::new(NotificationKind::Warning, "Latency", "Feed lag 800ms");
        let n = Notification::from_draft("n-1".into(), draft, ts);

        assert_eq!(n.id(), "n-1");
        assert_eq!(n.kind(), NotificationKind::Warning);
        assert_eq!(n.timestamp(), ts);
        assert!(!n.is_read());
    }

    #[test]
    fn test_kind_serialized_as_type_field() {
        let draft: NotificationDraft =
            serde_json::from_str(r#"{"type":"success","title":"Deploy","message":"ok"}"#).unwrap();
        assert_eq!(draft.kind, NotificationKind::Success);

        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["type"], "success");
    }
}
