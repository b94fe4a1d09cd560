//! `PgDocumentStore` against a real database.
//!
//! Ignored by default; run with `DATABASE_URL` set and `--ignored`.

use assert_matches::assert_matches;
use serde_json::json;
use sqlx::PgPool;
use studio_db::store::to_fields;
use studio_db::{DocumentStore, PgDocumentStore, StoreError};

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn insert_merge_delete_round_trip(pool: PgPool) {
    let store = PgDocumentStore::new(pool);

    let doc = store
        .insert("services", to_fields(&json!({"title": "X", "description": "Y"})).unwrap())
        .await
        .unwrap();

    let merged = store
        .merge("services", &doc.id, to_fields(&json!({"title": "Z"})).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(merged.fields["title"], "Z");
    assert_eq!(merged.fields["description"], "Y");

    let listed = store.list("services").await.unwrap();
    assert_eq!(listed.len(), 1);

    assert!(store.delete("services", &doc.id).await.unwrap());
    assert!(store.find_by_id("services", &doc.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn duplicate_user_email_is_rejected(pool: PgPool) {
    let store = PgDocumentStore::new(pool);
    let user = to_fields(&json!({"email": "a@b.com", "passwordHash": "h"})).unwrap();

    store.insert("users", user.clone()).await.unwrap();
    let err = store.insert("users", user).await.unwrap_err();
    assert_matches!(err, StoreError::Duplicate(c) if c == "uq_documents_user_email");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn find_by_field_filters_on_json_value(pool: PgPool) {
    let store = PgDocumentStore::new(pool);
    for approved in [true, false, true] {
        store
            .insert(
                "testimonials",
                to_fields(&json!({"name": "n", "message": "m", "approved": approved})).unwrap(),
            )
            .await
            .unwrap();
    }

    let approved = store
        .find_by_field("testimonials", "approved", &json!(true))
        .await
        .unwrap();
    assert_eq!(approved.len(), 2);
}
