use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// -- Users --

/// Registration input. The password is plaintext here and must only ever
/// reach the password scheme.
#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("phone", &self.phone)
            .finish()
    }
}

/// A freshly registered user, including the stored password hash.
///
/// The hash is skipped on serialization and redacted from debug output.
#[derive(Clone, Serialize)]
pub struct User {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub join_at: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("phone", &self.phone)
            .field("join_at", &self.join_at)
            .field("last_login_at", &self.last_login_at)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub join_at: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
}

// -- Messages --

/// The other party of a message, as their profile reads right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correspondent {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

/// A message seen from its sender's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentMessage {
    pub id: i64,
    pub to_user: Correspondent,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

/// A message seen from its recipient's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedMessage {
    pub id: i64,
    pub from_user: Correspondent,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub from_user: Correspondent,
    pub to_user: Correspondent,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadReceipt {
    pub id: i64,
    pub read_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            username: "ada".into(),
            password: "$argon2id$v=19$secret".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            phone: "555-0100".into(),
            join_at: now,
            last_login_at: now,
        }
    }

    #[test]
    fn user_hash_never_serialized() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "ada");
    }

    #[test]
    fn user_debug_redacts_hash() {
        let debug = format!("{:?}", sample_user());
        assert!(!debug.contains("argon2"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn new_user_rejects_unknown_fields() {
        let json = r#"{"username":"a","password":"p","first_name":"A","last_name":"B","phone":"1","admin":true}"#;
        assert!(serde_json::from_str::<NewUser>(json).is_err());
    }

    #[test]
    fn new_user_debug_redacts_password() {
        let new_user = NewUser {
            username: "ada".into(),
            password: "hunter22".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            phone: "555-0100".into(),
        };
        assert!(!format!("{:?}", new_user).contains("hunter22"));
    }
}
