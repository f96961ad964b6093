use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Algorithm, Argon2, Params, Version,
};
use tracing::error;

use crate::config::VerifierConfig;

/// Process-wide key for deriving password verifiers.
///
/// Every verifier is derived with the same salt, so the same password always
/// yields the same PHC string. Signin authenticates by re-deriving and
/// comparing.
#[derive(Clone)]
pub struct VerifierKey {
    argon2: Argon2<'static>,
    salt: SaltString,
}

impl VerifierKey {
    pub fn from_config(cfg: &VerifierConfig) -> anyhow::Result<Self> {
        let salt = SaltString::from_b64(&cfg.salt)
            .map_err(|e| anyhow::anyhow!("invalid verifier salt: {e}"))?;
        let params = Params::new(cfg.memory_kib, cfg.iterations, cfg.parallelism, None)
            .map_err(|e| anyhow::anyhow!("invalid argon2 parameters: {e}"))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            salt,
        })
    }

    pub fn derive(&self, plain: &str) -> anyhow::Result<String> {
        let hash = self
            .argon2
            .hash_password(plain.as_bytes(), &self.salt)
            .map_err(|e| {
                error!(error = %e, "argon2 hash_password error");
                anyhow::anyhow!(e.to_string())
            })?
            .to_string();
        Ok(hash)
    }
}

#[cfg(test)]
pub(crate) fn test_key() -> VerifierKey {
    VerifierKey::from_config(&crate::config::test_verifier_config()).expect("test verifier key")
}
