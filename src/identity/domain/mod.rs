//! Domain model for users and the actors that act on their behalf.

mod actor;
mod error;
mod ids;
mod password;
mod role;
mod user;

pub use actor::Actor;
pub use error::{IdentityDomainError, ParseRoleError};
pub use ids::UserId;
pub use password::PasswordHash;
pub use role::Role;
pub use user::{EmailAddress, PersistedUserData, User};
