use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::{is_valid_email, new_uid, IdentityError, IdentityProvider};

/// Identity provider backed by the `identities` table.
#[derive(Clone)]
pub struct PgIdentityProvider {
    db: PgPool,
}

impl PgIdentityProvider {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IdentityProvider for PgIdentityProvider {
    async fn create_identity(
        &self,
        email: &str,
        password_verifier: &str,
    ) -> Result<String, IdentityError> {
        if !is_valid_email(email) {
            return Err(IdentityError::InvalidEmail(email.to_string()));
        }
        let uid = new_uid();
        let inserted = sqlx::query(
            r#"
            INSERT INTO identities (uid, email, password_verifier)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&uid)
        .bind(email)
        .bind(password_verifier)
        .execute(&self.db)
        .await;

        match inserted {
            Ok(_) => {
                debug!(%uid, "identity created");
                Ok(uid)
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(IdentityError::Duplicate(email.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn lookup_by_email(&self, email: &str) -> Result<String, IdentityError> {
        let uid = sqlx::query_scalar::<_, String>(
            r#"
            SELECT uid
            FROM identities
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        uid.ok_or_else(|| IdentityError::NotFound(email.to_string()))
    }

    async fn delete_identity(&self, uid: &str) -> Result<(), IdentityError> {
        let result = sqlx::query(r#"DELETE FROM identities WHERE uid = $1"#)
            .bind(uid)
            .execute(&self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(IdentityError::NotFound(uid.to_string()));
        }
        debug!(%uid, "identity deleted");
        Ok(())
    }
}
