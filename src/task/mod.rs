//! Tasks and their status lifecycle.
//!
//! A task belongs to a project, is assigned to one user, and moves between
//! `TODO`, `WIP`, `DONE`, and `OVERDUE`. Every status change goes through
//! [`domain::TaskStatusPolicy`], which decides from the current status, the
//! requested status, and the acting user whether the change is allowed. Only
//! the overdue sweep in [`services::OverdueService`] moves tasks into
//! `OVERDUE`. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
