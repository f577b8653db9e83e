//! Request-scoped identity of the caller.

use super::{Role, UserId};
use serde::{Deserialize, Serialize};

/// The identity attempting an operation.
///
/// An actor is resolved once per request from its bearer token and passed
/// explicitly into every service call that needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    id: UserId,
    role: Role,
}

impl Actor {
    /// Creates an actor from a user identifier and role.
    #[must_use]
    pub const fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    /// Returns the acting user's identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the acting user's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns whether the actor has the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Returns whether the actor may create, list, and delete projects and
    /// create tasks.
    #[must_use]
    pub const fn can_manage_projects(&self) -> bool {
        self.is_admin()
    }

    /// Returns whether the actor is the given user.
    #[must_use]
    pub fn is(&self, user: UserId) -> bool {
        self.id == user
    }
}
