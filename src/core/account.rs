//! Customer accounts
//!
//! The stored account carries a salted password digest, never the raw
//! password. API responses use [`Profile`], which omits the digest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered customer account as persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: Uuid,
    /// Unique, stored lowercased
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    /// Reference to a profile image; the bytes live elsewhere
    pub avatar: Option<String>,
    /// Salted digest, see [`crate::auth::password`]
    pub password_digest: String,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        phone: Option<String>,
        avatar: Option<String>,
        password_digest: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: normalize_email(&email.into()),
            name: name.into(),
            phone,
            avatar,
            password_digest,
            created_at: Utc::now(),
        }
    }

    /// The client-safe view of this account
    pub fn profile(&self) -> Profile {
        Profile {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            phone: self.phone.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// Account view returned to clients; never includes credentials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub avatar: Option<String>,
}

/// Canonical form of an email identity: trimmed and lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_normalized() {
        let account = UserAccount::new(
            "  Maya@Example.COM ",
            "Maya",
            None,
            None,
            "salt$digest".into(),
        );
        assert_eq!(account.email, "maya@example.com");
    }

    #[test]
    fn test_profile_omits_digest() {
        let account = UserAccount::new(
            "maya@example.com",
            "Maya",
            Some("+41790000000".into()),
            None,
            "salt$digest".into(),
        );
        let json = serde_json::to_value(account.profile()).unwrap();
        assert!(json.get("password_digest").is_none());
        assert_eq!(json["email"], "maya@example.com");
        assert_eq!(json["phone"], "+41790000000");
    }
}
