//! Session token port.
//!
//! Tokens are opaque bearer strings mapped to a user. They expire after the
//! store's time-to-live and never outlive the store that issued them.

use crate::identity::domain::UserId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Opaque bearer token identifying a login session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generates a fresh random token.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!(
            "{}{}",
            Uuid::new_v4().simple(),
            Uuid::new_v4().simple()
        ))
    }

    /// Wraps a token presented by a client.
    #[must_use]
    pub fn from_bearer(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the token as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Session token storage contract.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Issues a new token for `user`.
    async fn issue(&self, user: UserId) -> Result<SessionToken, SessionStoreError>;

    /// Resolves a token to the user it was issued for.
    ///
    /// Unknown, revoked, and expired tokens resolve to `None`.
    async fn resolve(&self, token: &SessionToken) -> Result<Option<UserId>, SessionStoreError>;

    /// Revokes a token. Returns `false` when the token was unknown.
    async fn revoke(&self, token: &SessionToken) -> Result<bool, SessionStoreError>;
}

/// Errors returned by session stores.
#[derive(Debug, Clone, Error)]
pub enum SessionStoreError {
    /// Storage-layer failure.
    #[error("session storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl SessionStoreError {
    /// Wraps a storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}
