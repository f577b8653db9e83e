//! In-memory project repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::project::{
    domain::{Project, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};

/// Thread-safe in-memory project repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<HashMap<ProjectId, Project>>>,
}

impl InMemoryProjectRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> ProjectRepositoryError {
    ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut projects = self.projects.write().map_err(lock_error)?;
        if projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id()));
        }
        projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let projects = self.projects.read().map_err(lock_error)?;
        Ok(projects.get(&id).cloned())
    }

    async fn list(&self) -> ProjectRepositoryResult<Vec<Project>> {
        let projects = self.projects.read().map_err(lock_error)?;
        let mut all: Vec<Project> = projects.values().cloned().collect();
        all.sort_by_key(|project| (project.created_at(), project.id().into_inner()));
        Ok(all)
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        let mut projects = self.projects.write().map_err(lock_error)?;
        projects
            .remove(&id)
            .map(|_| ())
            .ok_or(ProjectRepositoryError::NotFound(id))
    }
}
