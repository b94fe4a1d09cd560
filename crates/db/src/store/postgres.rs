use async_trait::async_trait;
use serde_json::Value;
use sqlx::FromRow;
use studio_core::types::Timestamp;

use super::{new_id, Document, DocumentStore, Fields, StoreError};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, body, created_at, updated_at";

/// PostgreSQL unique violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Document store backed by the `documents` JSONB table.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: DbPool,
}

impl PgDocumentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: String,
    body: Value,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl TryFrom<DocumentRow> for Document {
    type Error = StoreError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        match row.body {
            Value::Object(fields) => Ok(Document {
                id: row.id,
                fields,
                created_at: row.created_at,
                updated_at: row.updated_at,
            }),
            other => Err(StoreError::Malformed(format!(
                "document {} has a non-object body: {other}",
                row.id
            ))),
        }
    }
}

fn into_documents(rows: Vec<DocumentRow>) -> Result<Vec<Document>, StoreError> {
    rows.into_iter().map(Document::try_from).collect()
}

/// Map unique violations to [`StoreError::Duplicate`]; pass everything else through.
fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            tracing::debug!(%constraint, "Unique constraint rejected write");
            return StoreError::Duplicate(constraint);
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let query =
            format!("SELECT {COLUMNS} FROM documents WHERE collection = $1 ORDER BY seq");
        let rows = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(collection)
            .fetch_all(&self.pool)
            .await?;
        into_documents(rows)
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE collection = $1 AND id = $2");
        sqlx::query_as::<_, DocumentRow>(&query)
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Document::try_from)
            .transpose()
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents \
             WHERE collection = $1 AND body -> $2 = $3 \
             ORDER BY seq"
        );
        let rows = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(collection)
            .bind(field)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;
        into_documents(rows)
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<Document, StoreError> {
        let query = format!(
            "INSERT INTO documents (collection, id, body) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(collection)
            .bind(new_id())
            .bind(Value::Object(fields))
            .fetch_one(&self.pool)
            .await
            .map_err(classify)?;
        Document::try_from(row)
    }

    async fn merge(
        &self,
        collection: &str,
        id: &str,
        patch: Fields,
    ) -> Result<Option<Document>, StoreError> {
        // `||` on jsonb objects is a shallow merge; right-hand keys win.
        let query = format!(
            "UPDATE documents SET body = body || $3, updated_at = now() \
             WHERE collection = $1 AND id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DocumentRow>(&query)
            .bind(collection)
            .bind(id)
            .bind(Value::Object(patch))
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .map(Document::try_from)
            .transpose()
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
