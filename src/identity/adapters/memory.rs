//! In-memory user repository and session store.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::identity::{
    domain::{EmailAddress, User, UserId},
    ports::{
        SessionStore, SessionStoreError, SessionToken, UserRepository, UserRepositoryError,
        UserRepositoryResult,
    },
};

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: HashMap<UserId, User>,
    email_index: HashMap<EmailAddress, UserId>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> UserRepositoryError {
    UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.email_index.contains_key(user.email()) {
            return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
        }
        state.email_index.insert(user.email().clone(), user.id());
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .email_index
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned())
    }
}

/// Lifetime of a session token when none is configured.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Thread-safe in-memory session token store.
///
/// Tokens expire `ttl` after they are issued. Expired tokens resolve to no
/// user and are dropped on the next lookup or issue.
pub struct InMemorySessionStore<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    sessions: Arc<RwLock<HashMap<SessionToken, SessionEntry>>>,
    clock: Arc<C>,
    ttl: TimeDelta,
}

#[derive(Debug, Clone, Copy)]
struct SessionEntry {
    user: UserId,
    expires_at: DateTime<Utc>,
}

impl InMemorySessionStore {
    /// Creates an empty session store using the system clock and
    /// [`DEFAULT_SESSION_TTL`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }

    /// Creates an empty session store whose tokens live for `ttl`.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::with_clock(Arc::new(DefaultClock), ttl)
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemorySessionStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty session store reading expiry times from `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<C>, ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            clock,
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
        }
    }

    /// Number of tokens currently held, expired or not.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError`] when the store lock is poisoned.
    pub fn len(&self) -> Result<usize, SessionStoreError> {
        let sessions = self.sessions.read().map_err(session_lock_error)?;
        Ok(sessions.len())
    }

    /// Returns whether the store holds no tokens.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError`] when the store lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, SessionStoreError> {
        self.len().map(|held| held == 0)
    }
}

impl<C> Clone for InMemorySessionStore<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
            clock: Arc::clone(&self.clock),
            ttl: self.ttl,
        }
    }
}

fn session_lock_error(err: impl ToString) -> SessionStoreError {
    SessionStoreError::storage(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl<C> SessionStore for InMemorySessionStore<C>
where
    C: Clock + Send + Sync,
{
    async fn issue(&self, user: UserId) -> Result<SessionToken, SessionStoreError> {
        let now = self.clock.utc();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let token = SessionToken::generate();
        let mut sessions = self.sessions.write().map_err(session_lock_error)?;
        sessions.retain(|_, entry| entry.expires_at > now);
        sessions.insert(token.clone(), SessionEntry { user, expires_at });
        Ok(token)
    }

    async fn resolve(&self, token: &SessionToken) -> Result<Option<UserId>, SessionStoreError> {
        let now = self.clock.utc();
        let mut sessions = self.sessions.write().map_err(session_lock_error)?;
        match sessions.get(token).copied() {
            Some(entry) if entry.expires_at > now => Ok(Some(entry.user)),
            Some(_) => {
                sessions.remove(token);
                tracing::debug!("session token expired");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn revoke(&self, token: &SessionToken) -> Result<bool, SessionStoreError> {
        let mut sessions = self.sessions.write().map_err(session_lock_error)?;
        Ok(sessions.remove(token).is_some())
    }
}
