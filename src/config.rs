use anyhow::Context;
use argon2::Params;
use serde::Deserialize;

/// Cost parameters and salt for the password verifier.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifierConfig {
    pub salt: String,
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub verifier: VerifierConfig,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let verifier = VerifierConfig {
            salt: std::env::var("VERIFIER_SALT").context("VERIFIER_SALT must be set")?,
            memory_kib: env_or("VERIFIER_MEMORY_KIB", Params::DEFAULT_M_COST)?,
            iterations: env_or("VERIFIER_ITERATIONS", Params::DEFAULT_T_COST)?,
            parallelism: env_or("VERIFIER_PARALLELISM", Params::DEFAULT_P_COST)?,
        };
        Ok(Self {
            database_url,
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 10)?,
            verifier,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_or("APP_PORT", 8080)?,
        })
    }
}

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

/// Cheap verifier settings shared by the test suite.
#[cfg(test)]
pub(crate) fn test_verifier_config() -> VerifierConfig {
    VerifierConfig {
        salt: "dEQ2TzlkRXBpZzk1MTFiNjd0aWVPTw".into(),
        memory_kib: 256,
        iterations: 1,
        parallelism: 1,
    }
}
