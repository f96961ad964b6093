//! Router driver and failure-injecting collaborators for tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt as _;

use crate::{
    app::build_app,
    identity::{IdentityError, IdentityProvider, MemoryIdentityProvider},
    state::AppState,
    store::{Collection, Document, DocumentStore, MemoryDocumentStore, StoreError},
};

pub(crate) async fn post_json(state: &AppState, uri: &str, body: Value) -> (StatusCode, String) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(state, req).await
}

pub(crate) async fn send(state: &AppState, req: Request<Body>) -> (StatusCode, String) {
    let resp = build_app(state.clone()).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn injected() -> sqlx::Error {
    sqlx::Error::Protocol("injected failure".into())
}

/// In-memory store whose `set` can be made to fail.
#[derive(Default)]
pub(crate) struct FlakyStore {
    inner: MemoryDocumentStore,
    set_fails: AtomicBool,
}

impl FlakyStore {
    pub fn fail_set(&self, on: bool) {
        self.set_fails.store(on, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn create(&self, collection: Collection, doc: Document) -> Result<String, StoreError> {
        self.inner.create(collection, doc).await
    }

    async fn set(&self, collection: Collection, id: &str, doc: Document) -> Result<(), StoreError> {
        if self.set_fails.load(Ordering::SeqCst) {
            return Err(StoreError::Backend(injected()));
        }
        self.inner.set(collection, id, doc).await
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Document, StoreError> {
        self.inner.get(collection, id).await
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: Document,
    ) -> Result<(), StoreError> {
        self.inner.update(collection, id, patch).await
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        self.inner.delete(collection, id).await
    }

    async fn query(
        &self,
        collection: Collection,
        field: &str,
        value: Value,
    ) -> Result<Vec<(String, Document)>, StoreError> {
        self.inner.query(collection, field, value).await
    }

    async fn list_all(&self, collection: Collection) -> Result<Vec<(String, Document)>, StoreError> {
        self.inner.list_all(collection).await
    }
}

/// In-memory identity provider whose `delete_identity` can be made to fail.
#[derive(Default)]
pub(crate) struct FlakyIdentity {
    inner: MemoryIdentityProvider,
    delete_fails: AtomicBool,
}

impl FlakyIdentity {
    pub fn fail_delete(&self, on: bool) {
        self.delete_fails.store(on, Ordering::SeqCst);
    }
}

#[async_trait]
impl IdentityProvider for FlakyIdentity {
    async fn create_identity(
        &self,
        email: &str,
        password_verifier: &str,
    ) -> Result<String, IdentityError> {
        self.inner.create_identity(email, password_verifier).await
    }

    async fn lookup_by_email(&self, email: &str) -> Result<String, IdentityError> {
        self.inner.lookup_by_email(email).await
    }

    async fn delete_identity(&self, uid: &str) -> Result<(), IdentityError> {
        if self.delete_fails.load(Ordering::SeqCst) {
            return Err(IdentityError::Provider(injected()));
        }
        self.inner.delete_identity(uid).await
    }
}
