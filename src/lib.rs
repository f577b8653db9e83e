//! Taskboard: a project and task tracker with a role-aware status lifecycle.
//!
//! Admins create projects and assign tasks to users. Assignees move their
//! tasks through `TODO`, `WIP`, and `DONE`; an overdue sweep moves past-due
//! open tasks into `OVERDUE`, after which only an admin may close them.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//!
//! # Modules
//!
//! - [`task`]: Tasks, the status policy, and the overdue sweep
//! - [`project`]: Projects that group tasks
//! - [`identity`]: Users, roles, sessions, and request-scoped actors
//! - [`http`]: JSON-over-HTTP surface built on `axum`
//! - [`config`]: Environment-driven server configuration
//! - [`database`]: `PostgreSQL` connection pooling
//! - [`telemetry`]: `tracing` subscriber setup

pub mod config;
pub mod database;
pub mod http;
pub mod identity;
pub mod project;
pub mod task;
pub mod telemetry;
