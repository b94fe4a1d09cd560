//! The document store seam.
//!
//! A collection holds schemaless JSON objects addressed by a store-assigned
//! string id. Every call is a single atomic operation on the backend; there
//! are no transactions spanning calls.

mod memory;
mod postgres;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use studio_core::types::{RecordId, Timestamp};

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;

/// Field map of a stored record.
pub type Fields = Map<String, Value>;

/// Keys the store manages itself; stripped from incoming field maps.
pub const RESERVED_KEYS: &[&str] = &["_id", "createdAt", "updatedAt"];

/// A field whose value must be unique within a collection.
#[derive(Debug, Clone, Copy)]
pub struct UniqueField {
    pub collection: &'static str,
    pub field: &'static str,
    /// Name reported in [`StoreError::Duplicate`].
    pub constraint: &'static str,
}

/// Uniqueness rules every backend enforces. Postgres carries them as
/// partial unique indexes in `migrations/`.
pub const UNIQUE_FIELDS: &[UniqueField] = &[UniqueField {
    collection: "users",
    field: "email",
    constraint: "uq_documents_user_email",
}];

/// A stored record as returned by every store operation.
///
/// Serializes flat: `{"_id": ..., <fields>..., "createdAt": ..., "updatedAt": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: Fields,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
    #[serde(rename = "updatedAt")]
    pub updated_at: Timestamp,
}

impl Document {
    /// Decode the record into a typed view.
    ///
    /// The id and timestamps are available to the target type under the same
    /// keys the document serializes with.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        let value = serde_json::to_value(self)?;
        Ok(serde_json::from_value(value)?)
    }

    /// String value of `field`, if present and a string.
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A uniqueness rule rejected the write.
    #[error("Duplicate value: {0}")]
    Duplicate(String),

    /// A stored body is not a JSON object or a payload did not encode to one.
    #[error("Malformed document: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// All records of `collection` in insertion order.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    async fn find_by_id(&self, collection: &str, id: &str)
        -> Result<Option<Document>, StoreError>;

    /// Records whose top-level `field` equals `value`, in insertion order.
    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError>;

    /// Persist a new record and assign it an id.
    async fn insert(&self, collection: &str, fields: Fields) -> Result<Document, StoreError>;

    /// Shallow-merge `patch` into the record. `None` if the id is unknown.
    async fn merge(
        &self,
        collection: &str,
        id: &str,
        patch: Fields,
    ) -> Result<Option<Document>, StoreError>;

    /// Remove the record. Returns whether anything was removed.
    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Encode a serializable payload into a field map.
///
/// `None` options should be skipped by the payload's serde attributes so that
/// a partial update only carries the fields the caller sent.
pub fn to_fields<T: Serialize>(payload: &T) -> Result<Fields, StoreError> {
    match serde_json::to_value(payload)? {
        Value::Object(mut map) => {
            for key in RESERVED_KEYS {
                map.remove(*key);
            }
            Ok(map)
        }
        other => Err(StoreError::Malformed(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

/// Fresh record id (UUID v7, so ids sort by creation time).
pub(crate) fn new_id() -> RecordId {
    uuid::Uuid::now_v7().to_string()
}
