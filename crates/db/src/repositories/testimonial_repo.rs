//! Testimonial listings, newest first.

use serde_json::Value;

use crate::models::testimonial::Testimonial;
use crate::models::Resource;
use crate::store::{Document, DocumentStore, StoreError};

pub struct TestimonialRepo;

impl TestimonialRepo {
    /// Approved testimonials for the public site.
    pub async fn list_approved(store: &dyn DocumentStore) -> Result<Vec<Document>, StoreError> {
        let docs = store
            .find_by_field(Testimonial::COLLECTION, "approved", &Value::Bool(true))
            .await?;
        Ok(newest_first(docs))
    }

    /// Every testimonial, approved or pending.
    pub async fn list_all(store: &dyn DocumentStore) -> Result<Vec<Document>, StoreError> {
        let docs = store.list(Testimonial::COLLECTION).await?;
        Ok(newest_first(docs))
    }
}

fn newest_first(mut docs: Vec<Document>) -> Vec<Document> {
    // Stable sort: equal timestamps keep reverse insertion order.
    docs.reverse();
    docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    docs
}
