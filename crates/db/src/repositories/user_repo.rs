//! Repository for the `users` collection.

use serde_json::Value;

use crate::models::user::{NewUser, User, UserPatch, USERS};
use crate::store::{to_fields, DocumentStore, StoreError};

/// Provides typed access to user documents.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created document.
    pub async fn create(store: &dyn DocumentStore, input: &NewUser) -> Result<User, StoreError> {
        let doc = store.insert(USERS, to_fields(input)?).await?;
        doc.decode()
    }

    pub async fn find_by_id(store: &dyn DocumentStore, id: &str) -> Result<Option<User>, StoreError> {
        store
            .find_by_id(USERS, id)
            .await?
            .map(|doc| doc.decode())
            .transpose()
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(
        store: &dyn DocumentStore,
        email: &str,
    ) -> Result<Option<User>, StoreError> {
        store
            .find_by_field(USERS, "email", &Value::String(email.to_string()))
            .await?
            .into_iter()
            .next()
            .map(|doc| doc.decode())
            .transpose()
    }

    /// Apply a partial update. Returns `None` if the user no longer exists.
    pub async fn update(
        store: &dyn DocumentStore,
        id: &str,
        patch: &UserPatch,
    ) -> Result<Option<User>, StoreError> {
        if patch.is_empty() {
            return Self::find_by_id(store, id).await;
        }
        store
            .merge(USERS, id, to_fields(patch)?)
            .await?
            .map(|doc| doc.decode())
            .transpose()
    }
}
