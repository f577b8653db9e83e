//! User identity, roles, and request-scoped actors.
//!
//! Every request that touches a task or project carries an explicit
//! [`domain::Actor`] resolved from its bearer token. Authorization decisions
//! are plain functions of the actor's [`domain::Role`], so they can be tested
//! without an HTTP stack.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
