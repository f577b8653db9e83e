//! Projects: named containers of tasks, managed by admins.
//!
//! Deleting a project deletes its tasks. The module follows the same
//! hexagonal layout as [`crate::task`].

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
