use async_trait::async_trait;
use serde_json::Value;
use sqlx::{types::Json, PgPool};

use super::{new_document_id, Collection, Document, DocumentStore, StoreError};

/// Document store backed by the JSONB `documents` table.
#[derive(Clone)]
pub struct PgDocumentStore {
    db: PgPool,
}

impl PgDocumentStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

type Row = (String, Json<Document>);

fn unwrap_rows(rows: Vec<Row>) -> Vec<(String, Document)> {
    rows.into_iter().map(|(id, Json(doc))| (id, doc)).collect()
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn create(&self, collection: Collection, doc: Document) -> Result<String, StoreError> {
        let id = new_document_id();
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(collection.as_str())
        .bind(&id)
        .bind(Json(doc))
        .execute(&self.db)
        .await?;
        Ok(id)
    }

    async fn set(&self, collection: Collection, id: &str, doc: Document) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id) DO UPDATE SET data = EXCLUDED.data
            "#,
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(Json(doc))
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Document, StoreError> {
        let row = sqlx::query_scalar::<_, Json<Document>>(
            r#"
            SELECT data
            FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection.as_str())
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        row.map(|Json(doc)| doc).ok_or_else(|| StoreError::NotFound {
            collection,
            id: id.to_string(),
        })
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: Document,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET data = data || $3
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(Json(patch))
        .execute(&self.db)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                collection,
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        sqlx::query(r#"DELETE FROM documents WHERE collection = $1 AND id = $2"#)
            .bind(collection.as_str())
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    async fn query(
        &self,
        collection: Collection,
        field: &str,
        value: Value,
    ) -> Result<Vec<(String, Document)>, StoreError> {
        let rows = sqlx::query_as::<_, Row>(
            r#"
            SELECT id, data
            FROM documents
            WHERE collection = $1 AND data -> $2 = $3
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(collection.as_str())
        .bind(field)
        .bind(Json(value))
        .fetch_all(&self.db)
        .await?;
        Ok(unwrap_rows(rows))
    }

    async fn list_all(&self, collection: Collection) -> Result<Vec<(String, Document)>, StoreError> {
        let rows = sqlx::query_as::<_, Row>(
            r#"
            SELECT id, data
            FROM documents
            WHERE collection = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(collection.as_str())
        .fetch_all(&self.db)
        .await?;
        Ok(unwrap_rows(rows))
    }
}
