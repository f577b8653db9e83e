//! Port contracts for user storage and session tokens.

pub mod repository;
pub mod sessions;

pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
pub use sessions::{SessionStore, SessionStoreError, SessionToken};
