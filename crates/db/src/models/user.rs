//! Admin user accounts.
//!
//! Users live in the `users` collection but have no generic CRUD routes; the
//! auth handlers go through [`UserRepo`](crate::repositories::UserRepo).

use serde::{Deserialize, Serialize};
use studio_core::types::{RecordId, Timestamp};

/// Collection holding user documents.
pub const USERS: &str = "users";

/// Full user document.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserProfile`] for external-facing output.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub profile_photo: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub email: String,
    pub profile_photo: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            profile_photo: user.profile_photo,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Fields stored for a newly registered user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

/// Partial update of a user document. All fields are optional.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password_hash.is_none() && self.profile_photo.is_none()
    }
}
