use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user account, as returned by every read path.
///
/// The stored password hash is deliberately not a field of this type, so
/// no serialization path can ever leak it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub email: String,
    pub role: String,
    pub avatar: Option<String>,
    pub status: String,
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user row joined with its password hash, for the login path only.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Request payload for creating a user.
///
/// The plaintext password is hashed by the repository before it is bound.
#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Sparse patch for a user. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub password: Option<String>,
    pub avatar: Option<String>,
    pub status: Option<String>,
    pub data: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serialization_has_no_password_key() {
        let user = User {
            id: 1,
            username: Some("admin".to_string()),
            email: "admin@example.com".to_string(),
            role: "admin".to_string(),
            avatar: None,
            status: "active".to_string(),
            data: serde_json::json!({}),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "admin@example.com");
    }

    #[test]
    fn test_patch_rejects_unknown_keys() {
        let result: Result<UserPatch, _> = serde_json::from_str(r#"{"nickname": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_patch_deserializes() {
        let patch: UserPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.email.is_none());
        assert!(patch.password.is_none());
    }
}
