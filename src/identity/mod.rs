//! Identity provider: email-keyed identities that own the user uid.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

mod memory;
mod postgres;

pub use memory::MemoryIdentityProvider;
pub use postgres::PgIdentityProvider;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("The email address is improperly formatted: {0}")]
    InvalidEmail(String),

    #[error("The email address is already in use by another account: {0}")]
    Duplicate(String),

    #[error("There is no user record corresponding to the provided identifier: {0}")]
    NotFound(String),

    #[error("identity provider failure: {0}")]
    Provider(#[from] sqlx::Error),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register `email` and return the new uid.
    async fn create_identity(
        &self,
        email: &str,
        password_verifier: &str,
    ) -> Result<String, IdentityError>;

    async fn lookup_by_email(&self, email: &str) -> Result<String, IdentityError>;

    async fn delete_identity(&self, uid: &str) -> Result<(), IdentityError>;
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn new_uid() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
