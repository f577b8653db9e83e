//! Login, logout, and bearer-token authentication.

use crate::identity::{
    domain::{Actor, EmailAddress, IdentityDomainError, PasswordHash, Role, User},
    ports::{SessionStore, SessionStoreError, SessionToken, UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Password given to the seeded default accounts.
pub const DEFAULT_PASSWORD: &str = "password";

/// Credentials presented at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    email: String,
    password: String,
}

impl LoginRequest {
    /// Creates a login request.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Request payload for registering a user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    name: String,
    email: String,
    password: String,
    role: Role,
}

impl RegisterUserRequest {
    /// Creates a registration request.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role,
        }
    }
}

/// An authenticated login session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Bearer token to present on subsequent requests.
    pub token: SessionToken,
    /// The logged-in user.
    pub user: User,
}

/// Service-level errors for authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The email/password pair did not match an account.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// The bearer token is missing, unknown, or revoked.
    #[error("unauthenticated")]
    Unauthenticated,
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// User repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
    /// Session store operation failed.
    #[error(transparent)]
    Session(#[from] SessionStoreError),
}

/// Result type for authentication service operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication orchestration service.
#[derive(Clone)]
pub struct AuthService<U, S, C>
where
    U: UserRepository + ?Sized,
    S: SessionStore + ?Sized,
    C: Clock + Send + Sync,
{
    users: Arc<U>,
    sessions: Arc<S>,
    clock: Arc<C>,
}

impl<U, S, C> AuthService<U, S, C>
where
    U: UserRepository + ?Sized,
    S: SessionStore + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new authentication service.
    #[must_use]
    pub const fn new(users: Arc<U>, sessions: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            users,
            sessions,
            clock,
        }
    }

    /// Registers a new user account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Domain`] for invalid input and
    /// [`AuthError::Repository`] when the email is taken or storage fails.
    pub async fn register(&self, request: RegisterUserRequest) -> AuthResult<User> {
        let RegisterUserRequest {
            name,
            email,
            password,
            role,
        } = request;
        let address = EmailAddress::new(email)?;
        let password_hash = PasswordHash::generate(&password)?;
        let user = User::new(name, address, password_hash, role, &*self.clock)?;
        self.users.store(&user).await?;
        tracing::info!(user_id = %user.id(), role = %user.role(), "registered user");
        Ok(user)
    }

    /// Creates the default admin and user accounts when they are missing.
    ///
    /// Returns how many accounts were created.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when lookup or storage fails.
    pub async fn seed_default_users(&self) -> AuthResult<usize> {
        let defaults = [
            RegisterUserRequest::new("Admin", "admin@test.com", DEFAULT_PASSWORD, Role::Admin),
            RegisterUserRequest::new("User One", "user@test.com", DEFAULT_PASSWORD, Role::User),
        ];

        let mut created = 0;
        for request in defaults {
            let address = EmailAddress::new(request.email.as_str())?;
            if self.users.find_by_email(&address).await?.is_some() {
                continue;
            }
            self.register(request).await?;
            created += 1;
        }
        Ok(created)
    }

    /// Verifies credentials and issues a session token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the email is unknown or
    /// the password does not match.
    pub async fn login(&self, request: LoginRequest) -> AuthResult<Session> {
        let Ok(address) = EmailAddress::new(request.email) else {
            return Err(AuthError::InvalidCredentials);
        };
        let user = self
            .users
            .find_by_email(&address)
            .await?
            .filter(|candidate| candidate.verify_password(&request.password));

        let Some(found) = user else {
            tracing::warn!(email = %address, "rejected login");
            return Err(AuthError::InvalidCredentials);
        };

        let token = self.sessions.issue(found.id()).await?;
        tracing::info!(user_id = %found.id(), "issued session");
        Ok(Session { token, user: found })
    }

    /// Revokes a session token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthenticated`] when the token was not active.
    pub async fn logout(&self, token: &SessionToken) -> AuthResult<()> {
        if self.sessions.revoke(token).await? {
            Ok(())
        } else {
            Err(AuthError::Unauthenticated)
        }
    }

    /// Resolves a bearer token to the acting user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthenticated`] when the token is unknown or
    /// its user no longer exists.
    pub async fn authenticate(&self, token: &SessionToken) -> AuthResult<Actor> {
        let user = self.current_user_for(token).await?;
        Ok(user.actor())
    }

    /// Returns the account of an authenticated actor.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthenticated`] when the account no longer
    /// exists.
    pub async fn me(&self, actor: &Actor) -> AuthResult<User> {
        self.users
            .find_by_id(actor.id())
            .await?
            .ok_or(AuthError::Unauthenticated)
    }

    /// Returns the account behind a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthenticated`] when the token is unknown or
    /// its user no longer exists.
    pub async fn current_user_for(&self, token: &SessionToken) -> AuthResult<User> {
        let user_id = self
            .sessions
            .resolve(token)
            .await?
            .ok_or(AuthError::Unauthenticated)?;
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::Unauthenticated)
    }
}
