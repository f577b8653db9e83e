//! Application services for project administration.

mod catalog;

pub use catalog::{
    AssignedTask, CreateProjectRequest, ProjectDetail, ProjectOverview, ProjectService,
    ProjectServiceError, ProjectServiceResult,
};
