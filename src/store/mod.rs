//! Generic document store over named collections.

use std::fmt;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

mod memory;
mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

pub type Document = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Timezones,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Users => "Users",
            Collection::Timezones => "Timezones",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No document: {collection}/{id}")]
    NotFound { collection: Collection, id: String },

    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("document store failure: {0}")]
    Backend(#[from] sqlx::Error),
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert `doc` under a freshly assigned id and return that id.
    async fn create(&self, collection: Collection, doc: Document) -> Result<String, StoreError>;

    /// Write `doc` under `id`, replacing whatever was there.
    async fn set(&self, collection: Collection, id: &str, doc: Document) -> Result<(), StoreError>;

    async fn get(&self, collection: Collection, id: &str) -> Result<Document, StoreError>;

    /// Shallow-merge the top-level fields of `patch` into an existing document.
    async fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: Document,
    ) -> Result<(), StoreError>;

    /// Deleting an absent document is not an error.
    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError>;

    /// Documents whose top-level `field` equals `value`, in creation order.
    async fn query(
        &self,
        collection: Collection,
        field: &str,
        value: Value,
    ) -> Result<Vec<(String, Document)>, StoreError>;

    async fn list_all(&self, collection: Collection) -> Result<Vec<(String, Document)>, StoreError>;
}

pub fn to_document<T: Serialize>(value: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Malformed(serde::ser::Error::custom(format!(
            "expected a JSON object, got {other}"
        )))),
    }
}

pub fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T, StoreError> {
    Ok(serde_json::from_value(Value::Object(doc))?)
}

pub(crate) fn new_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        full_name: String,
        role: i64,
    }

    #[test]
    fn typed_documents_convert_both_ways() {
        let doc = to_document(&Sample { full_name: "A B".into(), role: 0 }).expect("to doc");
        assert_eq!(doc.get("fullName"), Some(&Value::from("A B")));
        assert_eq!(doc.get("role"), Some(&Value::from(0)));

        let back: Sample = from_document(doc).expect("from doc");
        assert_eq!(back, Sample { full_name: "A B".into(), role: 0 });
    }

    #[test]
    fn non_object_values_are_rejected() {
        let err = to_document(&vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, StoreError::Malformed(_)));
    }

    #[test]
    fn missing_fields_are_malformed() {
        let mut doc = Document::new();
        doc.insert("fullName".into(), Value::from("A B"));
        let err = from_document::<Sample>(doc).unwrap_err();
        assert!(matches!(err, StoreError::Malformed(_)));
    }

    #[test]
    fn not_found_message_names_the_document_only() {
        let err = StoreError::NotFound {
            collection: Collection::Users,
            id: "u1".into(),
        };
        assert_eq!(err.to_string(), "No document: Users/u1");
    }

    #[test]
    fn collection_names_are_stable() {
        assert_eq!(Collection::Users.to_string(), "Users");
        assert_eq!(Collection::Timezones.as_str(), "Timezones");
    }
}
