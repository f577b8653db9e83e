//! Application services for authentication and user accounts.

mod auth;

pub use auth::{
    AuthError, AuthResult, AuthService, DEFAULT_PASSWORD, LoginRequest, RegisterUserRequest,
    Session,
};
