/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Account role as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Student,
    Admin,
    /// Any role this client does not special-case.
    #[default]
    Unknown,
    Other(String),
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "student" => Role::Student,
            "admin" => Role::Admin,
            "" => Role::Unknown,
            _ => Role::Other(value),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Admin => write!(f, "admin"),
            Role::Unknown => Ok(()),
            Role::Other(role) => write!(f, "{role}"),
        }
    }
}

/// Locally cached copy of the backend user record.
///
/// Only `name` and `role` matter to this crate; every other field is carried
/// through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    pub fn new(name: &str, role: Role) -> Self {
        Self {
            name: name.to_string(),
            role,
            extra: Map::new(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }
}

#[cfg(test)]
mod tests_user_profile {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_deserialize_keeps_extra_fields() {
        let user: UserProfile = serde_json::from_value(json!({
            "name": "Ann",
            "role": "student",
            "email": "a@b.com",
            "_id": "64f0"
        }))
        .unwrap();

        assert_eq!(user.name, "Ann");
        assert!(user.is_student());
        assert_eq!(user.extra["email"], json!("a@b.com"));

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["role"], json!("student"));
        assert_eq!(back["_id"], json!("64f0"));
    }

    #[test]
    fn test_unrecognised_role() {
        let user: UserProfile =
            serde_json::from_value(json!({"name": "Sam", "role": "counsellor"})).unwrap();
        assert_eq!(user.role, Role::Other("counsellor".to_string()));
        assert!(!user.is_admin());
        assert!(!user.is_student());
    }

    #[test]
    fn test_missing_fields_default() {
        let user: UserProfile = serde_json::from_value(json!({})).unwrap();
        assert_eq!(user.name, "");
        assert_eq!(user.role, Role::Unknown);
    }
}
