//! User accounts

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// A user account, shared across every organization it belongs to.
#[derive(Clone, Serialize)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,

    /// Normalized email address (unique)
    pub email: String,

    /// PHC-formatted password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Account-wide sign-in switch
    pub disabled: bool,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a user. The email is normalized first.
    pub fn new(email: &str, password_hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            email: normalize_email(email),
            password_hash: password_hash.into(),
            disabled: false,
            created_at: Utc::now(),
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("disabled", &self.disabled)
            .finish()
    }
}

/// Trim and lowercase an email address for uniqueness comparisons.
///
/// # Examples
///
/// ```
/// assert_eq!(team_org::normalize_email("  Jane@Example.COM "), "jane@example.com");
/// ```
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_email_normalized() {
        let user = User::new(" Jane.Doe@Example.com", "hash");
        assert_eq!(user.email, "jane.doe@example.com");
        assert!(!user.password_hash.is_empty());
        assert!(!user.disabled);
    }

    #[test]
    fn test_debug_redacts_hash() {
        let user = User::new("jane@example.com", "$argon2id$secret");
        let debug = format!("{:?}", user);
        assert!(!debug.contains("$argon2id$secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
