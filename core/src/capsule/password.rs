use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use eyre::{eyre, Result};

use crate::{config::PasswordHashingConfig, model::PasswordHash};

/// Hashes capsule passwords with argon2id. Parameters end up in the PHC string,
/// so verification works across parameter changes.
#[derive(Debug, Clone)]
pub struct CapsulePasswordHasher {
    params: Params,
}

impl CapsulePasswordHasher {
    pub fn new(config: &PasswordHashingConfig) -> Result<Self> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|err| eyre!("invalid argon2 parameters: {}", err))?;
        Ok(CapsulePasswordHasher { params })
    }

    pub fn hash(&self, password: &str) -> Result<PasswordHash> {
        let salt = SaltString::encode_b64(&rand::random::<[u8; 16]>())
            .map_err(|err| eyre!("error encoding salt: {}", err))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| eyre!("error hashing password: {}", err))?;
        Ok(PasswordHash(hash.to_string()))
    }
}

/// Constant-time check of `password` against a stored hash.
/// A hash that can't be parsed never verifies.
pub fn verify_password(hash: &PasswordHash, password: &str) -> bool {
    let parsed = match argon2::PasswordHash::new(hash.as_str()) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::warn!(%err, "stored capsule password hash is malformed");
            return false;
        }
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
pub(crate) fn test_hasher() -> CapsulePasswordHasher {
    CapsulePasswordHasher::new(&PasswordHashingConfig {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    })
    .expect("valid test argon2 params")
}
