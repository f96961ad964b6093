use serde_json::{Map, Value};

use crate::store::{from_document, to_document, Collection, DocumentStore, StoreError};
use crate::users::repo_types::UserProfile;

impl UserProfile {
    /// Write the profile under `uid`, replacing any previous one.
    pub async fn put(&self, store: &dyn DocumentStore, uid: &str) -> Result<(), StoreError> {
        store.set(Collection::Users, uid, to_document(self)?).await
    }

    pub async fn find(store: &dyn DocumentStore, uid: &str) -> Result<UserProfile, StoreError> {
        from_document(store.get(Collection::Users, uid).await?)
    }

    pub async fn set_role(store: &dyn DocumentStore, uid: &str, role: i64) -> Result<(), StoreError> {
        let mut patch = Map::new();
        patch.insert("role".into(), Value::from(role));
        store.update(Collection::Users, uid, patch).await
    }

    /// All profiles with their uids, in creation order.
    pub async fn list(store: &dyn DocumentStore) -> Result<Vec<(String, UserProfile)>, StoreError> {
        store
            .list_all(Collection::Users)
            .await?
            .into_iter()
            .map(|(uid, doc)| -> Result<_, StoreError> { Ok((uid, from_document(doc)?)) })
            .collect()
    }
}
