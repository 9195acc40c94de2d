use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Access level of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Member => write!(f, "member"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "member" => Ok(Role::Member),
            _ => Err(format!(
                "Invalid role '{}'. Valid options: admin, member",
                s
            )),
        }
    }
}

/// A registered user (admin back-office).
///
/// Authentication itself is handled by the external identity provider;
/// this record only carries what the back-office displays and edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_display() {
        assert_eq!(format!("{}", Role::Admin), "admin");
        assert_eq!(format!("{}", Role::Member), "member");
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
        assert_eq!(Role::from_str("MEMBER").unwrap(), Role::Member);
        assert!(Role::from_str("owner").is_err());
    }

    #[test]
    fn test_role_json_roundtrip() {
        let json = serde_json::to_string(&Role::Member).unwrap();
        assert_eq!(json, "\"member\"");
        let parsed: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Role::Member);
    }

    #[test]
    fn test_user_json_optional_name() {
        let json = format!(
            r#"{{"id":"{}","email":"ana@example.com","role":"member","created_at":"2026-02-01T00:00:00Z"}}"#,
            Uuid::new_v4()
        );
        let user: User = serde_json::from_str(&json).unwrap();
        assert!(user.name.is_none());
        assert_eq!(user.role, Role::Member);
    }
}
