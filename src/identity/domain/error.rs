//! Error types for identity domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The user's display name is empty after trimming.
    #[error("user name must not be empty")]
    EmptyName,

    /// The email address is not of the form `local@domain`.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The password is empty.
    #[error("password must not be empty")]
    EmptyPassword,

    /// The stored password hash is not a PHC string.
    #[error("malformed password hash")]
    MalformedPasswordHash,

    /// The password hasher rejected its input.
    #[error("password hashing failed: {0}")]
    PasswordHashing(String),
}

/// Error returned while parsing a role from persistence or request input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
