use serde_json::Value;

use crate::store::{from_document, to_document, Collection, Document, DocumentStore, StoreError};
use crate::timezones::repo_types::{TimezoneDetails, TimezoneRecord};

fn decode_all(rows: Vec<(String, Document)>) -> Result<Vec<(String, TimezoneRecord)>, StoreError> {
    rows.into_iter()
        .map(|(id, doc)| -> Result<_, StoreError> { Ok((id, from_document(doc)?)) })
        .collect()
}

impl TimezoneRecord {
    /// Insert and return the new timezone id.
    pub async fn insert(&self, store: &dyn DocumentStore) -> Result<String, StoreError> {
        store.create(Collection::Timezones, to_document(self)?).await
    }

    pub async fn list_by_user(
        store: &dyn DocumentStore,
        uid: &str,
    ) -> Result<Vec<(String, TimezoneRecord)>, StoreError> {
        let rows = store
            .query(Collection::Timezones, "userId", Value::from(uid))
            .await?;
        decode_all(rows)
    }

    pub async fn list(store: &dyn DocumentStore) -> Result<Vec<(String, TimezoneRecord)>, StoreError> {
        decode_all(store.list_all(Collection::Timezones).await?)
    }

    pub async fn remove(store: &dyn DocumentStore, id: &str) -> Result<(), StoreError> {
        store.delete(Collection::Timezones, id).await
    }
}

impl TimezoneDetails {
    /// Overwrite timezone, city and gmt; the owner is left untouched.
    pub async fn apply(&self, store: &dyn DocumentStore, id: &str) -> Result<(), StoreError> {
        store
            .update(Collection::Timezones, id, to_document(self)?)
            .await
    }
}
