use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{new_document_id, Collection, Document, DocumentStore, StoreError};

/// Process-local store; each collection keeps documents in insertion order.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<HashMap<Collection, Vec<(String, Document)>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_collection<R>(
        &self,
        collection: Collection,
        f: impl FnOnce(&mut Vec<(String, Document)>) -> R,
    ) -> R {
        let mut guard = self.collections.lock().unwrap_or_else(|p| p.into_inner());
        f(guard.entry(collection).or_default())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create(&self, collection: Collection, doc: Document) -> Result<String, StoreError> {
        let id = new_document_id();
        self.with_collection(collection, |docs| docs.push((id.clone(), doc)));
        Ok(id)
    }

    async fn set(&self, collection: Collection, id: &str, doc: Document) -> Result<(), StoreError> {
        self.with_collection(collection, |docs| {
            match docs.iter_mut().find(|(existing, _)| existing == id) {
                Some((_, slot)) => *slot = doc,
                None => docs.push((id.to_string(), doc)),
            }
        });
        Ok(())
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Document, StoreError> {
        self.with_collection(collection, |docs| {
            docs.iter()
                .find(|(existing, _)| existing == id)
                .map(|(_, doc)| doc.clone())
        })
        .ok_or_else(|| StoreError::NotFound {
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
        let found = self.with_collection(collection, |docs| {
            match docs.iter_mut().find(|(existing, _)| existing == id) {
                Some((_, doc)) => {
                    doc.extend(patch);
                    true
                }
                None => false,
            }
        });
        if found {
            Ok(())
        } else {
            Err(StoreError::NotFound {
                collection,
                id: id.to_string(),
            })
        }
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        self.with_collection(collection, |docs| docs.retain(|(existing, _)| existing != id));
        Ok(())
    }

    async fn query(
        &self,
        collection: Collection,
        field: &str,
        value: Value,
    ) -> Result<Vec<(String, Document)>, StoreError> {
        Ok(self.with_collection(collection, |docs| {
            docs.iter()
                .filter(|(_, doc)| doc.get(field) == Some(&value))
                .cloned()
                .collect()
        }))
    }

    async fn list_all(&self, collection: Collection) -> Result<Vec<(String, Document)>, StoreError> {
        Ok(self.with_collection(collection, |docs| docs.clone()))
    }
}
