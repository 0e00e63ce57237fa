//! Password hashing capability.
//!
//! Hashing is an injected capability rather than a global: services take a
//! `dyn Hasher` so tests can substitute a cheap implementation.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::errors::{AppError, AppResult};

/// Hashing capability injected into the services that handle credentials.
pub trait Hasher: Send + Sync {
    /// Hash a plain-text password for storage.
    fn hash(&self, plain_text: &str) -> AppResult<String>;

    /// Verify a plain-text password against a stored hash.
    fn verify(&self, plain_text: &str, hash: &str) -> bool;
}

/// Argon2-backed implementation used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl Hasher for Argon2Hasher {
    fn hash(&self, plain_text: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify(&self, plain_text: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok()
    }
}

/// A well-formed hash that never matches any input. Used during login to
/// keep verification cost constant when the username does not exist.
pub const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";
