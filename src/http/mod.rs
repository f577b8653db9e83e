//! JSON-over-HTTP surface.
//!
//! Every route except `POST /login` requires a bearer token; the
//! [`auth::Authenticated`] extractor resolves it to an
//! [`Actor`](crate::identity::domain::Actor) that handlers pass explicitly into
//! the services. Service errors become `{ "message": ... }` responses through
//! [`error::ApiError`].

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::router;
pub use state::{AppState, Repositories};
