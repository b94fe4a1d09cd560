use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{new_id, Document, DocumentStore, Fields, StoreError, UNIQUE_FIELDS};

type Collection = IndexMap<String, Document>;

/// Process-local document store.
///
/// Keeps insertion order per collection. Used for local development when no
/// `DATABASE_URL` is configured, and by the HTTP test suite.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Check `fields` against [`UNIQUE_FIELDS`], ignoring the record `own_id`.
///
/// Runs under the write lock so check and write are one step.
fn check_unique(
    collection_name: &str,
    collection: Option<&Collection>,
    own_id: Option<&str>,
    fields: &Fields,
) -> Result<(), StoreError> {
    let Some(collection) = collection else {
        return Ok(());
    };
    for rule in UNIQUE_FIELDS.iter().filter(|r| r.collection == collection_name) {
        let Some(value) = fields.get(rule.field).filter(|v| !v.is_null()) else {
            continue;
        };
        let taken = collection.values().any(|doc| {
            Some(doc.id.as_str()) != own_id && doc.fields.get(rule.field) == Some(value)
        });
        if taken {
            return Err(StoreError::Duplicate(rule.constraint.to_string()));
        }
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .map(|c| c.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        let guard = self.collections.read().await;
        Ok(guard.get(collection).and_then(|c| c.get(id)).cloned())
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .map(|c| {
                c.values()
                    .filter(|doc| doc.fields.get(field) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<Document, StoreError> {
        let now = Utc::now();
        let doc = Document {
            id: new_id(),
            fields,
            created_at: now,
            updated_at: now,
        };

        let mut guard = self.collections.write().await;
        check_unique(collection, guard.get(collection), None, &doc.fields)?;
        guard
            .entry(collection.to_string())
            .or_default()
            .insert(doc.id.clone(), doc.clone());
        Ok(doc)
    }

    async fn merge(
        &self,
        collection: &str,
        id: &str,
        patch: Fields,
    ) -> Result<Option<Document>, StoreError> {
        let mut guard = self.collections.write().await;
        let existing = guard.get(collection).filter(|c| c.contains_key(id));
        if existing.is_none() {
            return Ok(None);
        }
        check_unique(collection, existing, Some(id), &patch)?;
        let Some(doc) = guard.get_mut(collection).and_then(|c| c.get_mut(id)) else {
            return Ok(None);
        };
        doc.fields.extend(patch);
        doc.updated_at = Utc::now();
        Ok(Some(doc.clone()))
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let mut guard = self.collections.write().await;
        Ok(guard
            .get_mut(collection)
            .is_some_and(|c| c.shift_remove(id).is_some()))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::store::to_fields;

    fn fields(v: Value) -> Fields {
        to_fields(&v).unwrap()
    }

    #[tokio::test]
    async fn empty_collection_lists_nothing() {
        let store = MemoryStore::new();
        assert!(store.list("services").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_then_find() {
        let store = MemoryStore::new();
        let doc = store
            .insert("services", fields(json!({"title": "X", "description": "Y"})))
            .await
            .unwrap();

        let found = store.find_by_id("services", &doc.id).await.unwrap().unwrap();
        assert_eq!(found, doc);
        assert!(store.find_by_id("about", &doc.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_keeps_insertion_order_after_delete() {
        let store = MemoryStore::new();
        let a = store.insert("team", fields(json!({"name": "a"}))).await.unwrap();
        let b = store.insert("team", fields(json!({"name": "b"}))).await.unwrap();
        let c = store.insert("team", fields(json!({"name": "c"}))).await.unwrap();

        assert!(store.delete("team", &b.id).await.unwrap());

        let ids: Vec<_> = store
            .list("team")
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }

    #[tokio::test]
    async fn merge_is_shallow_and_keeps_other_fields() {
        let store = MemoryStore::new();
        let doc = store
            .insert("about", fields(json!({"title": "Old", "description": "Keep"})))
            .await
            .unwrap();

        let merged = store
            .merge("about", &doc.id, fields(json!({"title": "New"})))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(merged.fields["title"], "New");
        assert_eq!(merged.fields["description"], "Keep");
        assert_eq!(merged.created_at, doc.created_at);
        assert!(merged.updated_at >= doc.updated_at);
    }

    #[tokio::test]
    async fn merge_unknown_id_is_none() {
        let store = MemoryStore::new();
        let result = store
            .merge("about", "missing", fields(json!({"title": "t"})))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_unknown_id_reports_false() {
        let store = MemoryStore::new();
        assert!(!store.delete("services", "missing").await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_user_email_is_rejected_on_insert_and_merge() {
        let store = MemoryStore::new();
        store
            .insert("users", fields(json!({"email": "a@b.com"})))
            .await
            .unwrap();
        let other = store
            .insert("users", fields(json!({"email": "c@d.com"})))
            .await
            .unwrap();

        let result = store.insert("users", fields(json!({"email": "a@b.com"}))).await;
        assert!(matches!(result, Err(StoreError::Duplicate(c)) if c == "uq_documents_user_email"));

        let result = store
            .merge("users", &other.id, fields(json!({"email": "a@b.com"})))
            .await;
        assert!(matches!(result, Err(StoreError::Duplicate(_))));

        // Re-saving a record's own email is fine.
        let same = store
            .merge("users", &other.id, fields(json!({"email": "c@d.com"})))
            .await
            .unwrap();
        assert!(same.is_some());

        // Other collections are unconstrained.
        store
            .insert("contact", fields(json!({"email": "a@b.com"})))
            .await
            .unwrap();
        store
            .insert("contact", fields(json!({"email": "a@b.com"})))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn find_by_field_matches_exact_values() {
        let store = MemoryStore::new();
        store
            .insert("testimonials", fields(json!({"name": "a", "approved": true})))
            .await
            .unwrap();
        store
            .insert("testimonials", fields(json!({"name": "b", "approved": false})))
            .await
            .unwrap();

        let approved = store
            .find_by_field("testimonials", "approved", &json!(true))
            .await
            .unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].fields["name"], "a");
    }
}
