use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - a registered and activated account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Stored, never serialized outward.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub profile_pic: Option<String>,
    pub gender: String,
    /// Ids of the articles this user authored, oldest first.
    pub posts: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(username: String, email: String, gender: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            profile_pic: None,
            gender,
            posts: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The fields other users get to see when this user authors something.
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
            profile_pic: self.profile_pic.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

/// Author data attached to articles and comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub profile_pic: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// An account that signed up but has not followed its activation link yet.
///
/// Travels inside the signed activation token; nothing is persisted until
/// the token comes back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAccount {
    pub username: String,
    pub email: String,
    pub gender: String,
    pub password_hash: String,
}

impl From<PendingAccount> for User {
    fn from(pending: PendingAccount) -> Self {
        User::new(
            pending.username,
            pending.email,
            pending.gender,
            pending.password_hash,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_not_serialized() {
        let user = User::new(
            "ada".to_string(),
            "ada@example.com".to_string(),
            "female".to_string(),
            "$argon2id$secret".to_string(),
        );

        let json = serde_json::to_string(&user).unwrap();

        assert!(!json.contains("password"));
        assert!(!json.contains("$argon2id$secret"));
        assert!(json.contains("ada@example.com"));
    }

    #[test]
    fn public_view_keeps_identity_fields() {
        let user = User::new(
            "ada".to_string(),
            "ada@example.com".to_string(),
            "female".to_string(),
            "hash".to_string(),
        );

        let public = user.public();

        assert_eq!(public.id, user.id);
        assert_eq!(public.username, "ada");
        assert_eq!(public.created_at, user.created_at);
    }
}
