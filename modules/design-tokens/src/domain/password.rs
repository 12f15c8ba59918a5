//! Password hashing and verification using Argon2.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::domain::error::DomainError;

/// Turns plaintext passwords into self-describing hash strings and back.
pub trait CredentialHasher: Send + Sync {
    /// # Errors
    /// [`DomainError::Hashing`] if the hasher fails.
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// `Ok(false)` for a wrong password; errors are reserved for unreadable hashes.
    ///
    /// # Errors
    /// [`DomainError::Hashing`] if `hash` is not a valid PHC string.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}

/// Argon2id with a random per-password salt.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    #[must_use]
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| DomainError::Hashing(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let parsed = PasswordHash::new(hash).map_err(|e| DomainError::Hashing(e.to_string()))?;
        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(e) => Err(DomainError::Hashing(e.to_string())),
        }
    }
}
