use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::password::VerifierKey;
use crate::config::AppConfig;
use crate::db;
use crate::identity::{IdentityProvider, MemoryIdentityProvider, PgIdentityProvider};
use crate::store::{DocumentStore, MemoryDocumentStore, PgDocumentStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub identity: Arc<dyn IdentityProvider>,
    pub store: Arc<dyn DocumentStore>,
    pub verifier: VerifierKey,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let (identity, store) = match &config.database_url {
            Some(url) => {
                let pool = db::connect(url, config.db_max_connections).await?;
                db::migrate(&pool).await?;
                (
                    Arc::new(PgIdentityProvider::new(pool.clone())) as Arc<dyn IdentityProvider>,
                    Arc::new(PgDocumentStore::new(pool)) as Arc<dyn DocumentStore>,
                )
            }
            None => {
                tracing::warn!("DATABASE_URL not set; using in-memory identity provider and store");
                (
                    Arc::new(MemoryIdentityProvider::new()) as Arc<dyn IdentityProvider>,
                    Arc::new(MemoryDocumentStore::new()) as Arc<dyn DocumentStore>,
                )
            }
        };

        Self::from_parts(config, identity, store)
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn DocumentStore>,
    ) -> anyhow::Result<Self> {
        let verifier = VerifierKey::from_config(&config.verifier)?;
        Ok(Self {
            config,
            identity,
            store,
            verifier,
        })
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        Self::with_collaborators(
            Arc::new(MemoryIdentityProvider::new()),
            Arc::new(MemoryDocumentStore::new()),
        )
    }

    #[cfg(test)]
    pub fn with_collaborators(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn DocumentStore>,
    ) -> Self {
        let config = Arc::new(AppConfig {
            database_url: None,
            db_max_connections: 1,
            verifier: crate::config::test_verifier_config(),
            host: "127.0.0.1".into(),
            port: 0,
        });
        Self::from_parts(config, identity, store).expect("fake state")
    }
}

impl FromRef<AppState> for VerifierKey {
    fn from_ref(state: &AppState) -> Self {
        state.verifier.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fake_state_uses_the_shared_test_verifier() {
        let state = AppState::fake();
        let expected = crate::auth::password::test_key().derive("pw").unwrap();
        assert_eq!(state.verifier.derive("pw").unwrap(), expected);
    }
}
