//! Identity of the operator currently logged into the dashboard.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Desk role of a dashboard user.
///
/// The role is recorded for display only. Nothing in the control plane gates
/// actions on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Trader,
    Analyst,
    RiskManager,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Trader => write!(f, "trader"),
            Role::Analyst => write!(f, "analyst"),
            Role::RiskManager => write!(f, "risk_manager"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trader" => Ok(Role::Trader),
            "analyst" => Ok(Role::Analyst),
            "risk_manager" => Ok(Role::RiskManager),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: String,
    username: String,
    role: Role,
    email: String,
}

impl User {
    /// Creates a new User.
    ///
    /// # Arguments
    ///
    /// * `id` - Opaque identifier issued by the auth collaborator.
    /// * `username` - Login name shown in the header bar.
    /// * `role` - Desk role.
    /// * `email` - Contact address.
    ///
    /// # Returns
    ///
    /// * A new `User`. No field is validated.
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        role: Role,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            role,
            email: email.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        let json = serde_json::to_string(&Role::RiskManager).unwrap();
        assert_eq!(json, "\"risk_manager\"");

        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_role_from_str_matches_display() {
        for role in [Role::Trader, Role::Analyst, Role::RiskManager, Role::Admin] {
            assert_eq!(role.to_string().parse::<Role>(), Ok(role));
        }
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_user_deserializes_from_ui_payload() {
        let raw = r#"{"id":"u-1","username":"alice","role":"trader","email":"a@desk.io"}"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user.username(), "alice");
        assert_eq!(user.role(), Role::Trader);
    }
}
