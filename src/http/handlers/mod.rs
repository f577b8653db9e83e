//! Route handlers, grouped by resource.

pub mod auth;
pub mod overdue;
pub mod projects;
pub mod tasks;
