//! Generic record access for any [`Resource`].

use crate::models::{Editable, Resource};
use crate::store::{to_fields, Document, DocumentStore, StoreError};

/// CRUD operations shared by every resource collection.
///
/// Payloads are expected to be validated by the caller; this layer only
/// encodes them and performs one store call per operation.
pub struct RecordRepo;

impl RecordRepo {
    /// All records of the resource, store default order.
    pub async fn list<R: Resource>(store: &dyn DocumentStore) -> Result<Vec<Document>, StoreError> {
        store.list(R::COLLECTION).await
    }

    pub async fn find_by_id<R: Resource>(
        store: &dyn DocumentStore,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        store.find_by_id(R::COLLECTION, id).await
    }

    /// Persist a new record, returning it with its assigned id.
    pub async fn create<R: Resource>(
        store: &dyn DocumentStore,
        input: &R::Create,
    ) -> Result<Document, StoreError> {
        let fields = to_fields(input)?;
        store.insert(R::COLLECTION, fields).await
    }

    /// Merge the provided fields into an existing record.
    ///
    /// Returns `None` if no record has that id. Last write wins.
    pub async fn update<R: Editable>(
        store: &dyn DocumentStore,
        id: &str,
        input: &R::Update,
    ) -> Result<Option<Document>, StoreError> {
        let patch = to_fields(input)?;
        if patch.is_empty() {
            return store.find_by_id(R::COLLECTION, id).await;
        }
        store.merge(R::COLLECTION, id, patch).await
    }

    /// Remove a record. Returns whether anything was removed.
    pub async fn delete<R: Resource>(store: &dyn DocumentStore, id: &str) -> Result<bool, StoreError> {
        store.delete(R::COLLECTION, id).await
    }
}
