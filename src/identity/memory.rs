use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use super::{is_valid_email, new_uid, IdentityError, IdentityProvider};

#[derive(Default)]
struct Identities {
    uid_by_email: HashMap<String, String>,
    email_by_uid: HashMap<String, String>,
}

/// Process-local identity provider.
#[derive(Default)]
pub struct MemoryIdentityProvider {
    inner: Mutex<Identities>,
}

impl MemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn create_identity(
        &self,
        email: &str,
        _password_verifier: &str,
    ) -> Result<String, IdentityError> {
        if !is_valid_email(email) {
            return Err(IdentityError::InvalidEmail(email.to_string()));
        }
        let mut ids = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        if ids.uid_by_email.contains_key(email) {
            return Err(IdentityError::Duplicate(email.to_string()));
        }
        let uid = new_uid();
        ids.uid_by_email.insert(email.to_string(), uid.clone());
        ids.email_by_uid.insert(uid.clone(), email.to_string());
        debug!(%uid, "identity created");
        Ok(uid)
    }

    async fn lookup_by_email(&self, email: &str) -> Result<String, IdentityError> {
        let ids = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        ids.uid_by_email
            .get(email)
            .cloned()
            .ok_or_else(|| IdentityError::NotFound(email.to_string()))
    }

    async fn delete_identity(&self, uid: &str) -> Result<(), IdentityError> {
        let mut ids = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        let email = ids
            .email_by_uid
            .remove(uid)
            .ok_or_else(|| IdentityError::NotFound(uid.to_string()))?;
        ids.uid_by_email.remove(&email);
        debug!(%uid, "identity deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_lookup_delete() {
        let provider = MemoryIdentityProvider::new();
        let uid = provider.create_identity("a@b.com", "v").await.expect("create");
        assert_eq!(provider.lookup_by_email("a@b.com").await.expect("lookup"), uid);

        provider.delete_identity(&uid).await.expect("delete");
        assert!(matches!(
            provider.lookup_by_email("a@b.com").await,
            Err(IdentityError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn rejects_duplicate_email() {
        let provider = MemoryIdentityProvider::new();
        provider.create_identity("a@b.com", "v").await.expect("create");
        let err = provider.create_identity("a@b.com", "w").await.unwrap_err();
        assert!(matches!(err, IdentityError::Duplicate(_)));
    }

    #[tokio::test]
    async fn rejects_malformed_email() {
        let provider = MemoryIdentityProvider::new();
        let err = provider.create_identity("not-an-email", "v").await.unwrap_err();
        assert!(matches!(err, IdentityError::InvalidEmail(_)));
    }

    #[tokio::test]
    async fn delete_unknown_uid_is_not_found() {
        let provider = MemoryIdentityProvider::new();
        let err = provider.delete_identity("missing").await.unwrap_err();
        assert!(matches!(err, IdentityError::NotFound(_)));
    }

    #[tokio::test]
    async fn email_is_reusable_after_delete() {
        let provider = MemoryIdentityProvider::new();
        let first = provider.create_identity("a@b.com", "v").await.expect("create");
        provider.delete_identity(&first).await.expect("delete");
        let second = provider.create_identity("a@b.com", "v").await.expect("recreate");
        assert_ne!(first, second);
    }
}
