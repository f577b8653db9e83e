//! Argon2id password hashes.

use super::IdentityDomainError;
use argon2::{
    Argon2,
    password_hash::{self, PasswordHasher, PasswordVerifier, SaltString},
};
use std::fmt;
use uuid::Uuid;

/// Argon2id password hash kept in PHC string form
/// (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`).
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hashes `password` with a freshly generated salt.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyPassword`] when the password is
    /// empty and [`IdentityDomainError::PasswordHashing`] when hashing fails.
    pub fn generate(password: &str) -> Result<Self, IdentityDomainError> {
        if password.is_empty() {
            return Err(IdentityDomainError::EmptyPassword);
        }
        let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes()).map_err(hashing_error)?;
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(hashing_error)?;
        Ok(Self(hash.to_string()))
    }

    /// Wraps a previously stored PHC string.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::MalformedPasswordHash`] when the value
    /// does not parse as a PHC string.
    pub fn from_stored(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let stored = value.into();
        password_hash::PasswordHash::new(&stored)
            .map_err(|_| IdentityDomainError::MalformedPasswordHash)?;
        Ok(Self(stored))
    }

    /// Returns whether `password` matches this hash.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        password_hash::PasswordHash::new(&self.0).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
    }

    /// Returns the stored representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

fn hashing_error(err: password_hash::Error) -> IdentityDomainError {
    IdentityDomainError::PasswordHashing(err.to_string())
}
