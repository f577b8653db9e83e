//! Domain model for projects.

mod error;
mod ids;
mod project;

pub use error::ProjectDomainError;
pub use ids::{ProjectId, ProjectName};
pub use project::{PersistedProjectData, Project};
