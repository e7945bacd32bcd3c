use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::{self, SaltString, rand_core::OsRng},
};

use crate::config::HashConfig;
use crate::error::{RepoError, Result};

/// One-way, salted password hashing.
pub trait PasswordScheme: Send + Sync {
    /// Hash `plaintext` with a fresh salt. The output is a self-describing PHC string.
    fn hash(&self, plaintext: &str) -> Result<String>;

    /// `Ok(false)` on a mismatch; `Err` only when the stored hash itself is unusable.
    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool>;
}

/// Argon2id with a configurable work factor.
#[derive(Clone)]
pub struct Argon2Scheme {
    argon2: Argon2<'static>,
}

impl Argon2Scheme {
    pub fn new(config: HashConfig) -> Result<Self> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| RepoError::Hashing(format!("invalid Argon2 parameters: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl PasswordScheme for Argon2Scheme {
    fn hash(&self, plaintext: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| RepoError::Hashing(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| RepoError::Hashing(format!("malformed stored hash: {}", e)))?;

        // Cost parameters come from the stored hash, not from self.
        match self.argon2.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(RepoError::Hashing(e.to_string())),
        }
    }
}
