//! Service layer for project administration and browsing.

use crate::identity::{
    domain::{Actor, User, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use crate::project::{
    domain::{Project, ProjectDomainError, ProjectId, ProjectName},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::{
    domain::Task,
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    description: Option<String>,
}

impl CreateProjectRequest {
    /// Creates a request for a project called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Sets the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A project with its creator and tasks, as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOverview {
    /// The project.
    pub project: Project,
    /// The creating user, if the account still exists.
    pub creator: Option<User>,
    /// The project's tasks.
    pub tasks: Vec<Task>,
}

/// A task on the project detail view, with its assignee resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedTask {
    /// The task.
    pub task: Task,
    /// The assigned user, if the account still exists.
    pub assignee: Option<User>,
}

/// A project with its tasks and their assignees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetail {
    /// The project.
    pub project: Project,
    /// The project's tasks, each with its assignee.
    pub tasks: Vec<AssignedTask>,
}

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// The actor lacks the role required for the operation.
    #[error("forbidden")]
    Forbidden,
    /// The project does not exist.
    #[error("project not found: {0}")]
    NotFound(ProjectId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// Project repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
    /// Task repository operation failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
    /// User lookup failed.
    #[error(transparent)]
    UserRepository(#[from] UserRepositoryError),
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project orchestration service.
#[derive(Clone)]
pub struct ProjectService<P, T, U, C>
where
    P: ProjectRepository + ?Sized,
    T: TaskRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    tasks: Arc<T>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<P, T, U, C> ProjectService<P, T, U, C>
where
    P: ProjectRepository + ?Sized,
    T: TaskRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(projects: Arc<P>, tasks: Arc<T>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            projects,
            tasks,
            users,
            clock,
        }
    }

    /// Creates a project owned by `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Forbidden`] for non-admin actors and
    /// [`ProjectServiceError::Domain`] for a blank name.
    pub async fn create(
        &self,
        actor: &Actor,
        request: CreateProjectRequest,
    ) -> ProjectServiceResult<Project> {
        require_admin(actor)?;
        let name = ProjectName::new(request.name)?;
        let project = Project::new(name, request.description, actor.id(), &*self.clock);
        self.projects.store(&project).await?;
        tracing::info!(project_id = %project.id(), created_by = %actor.id(), "created project");
        Ok(project)
    }

    /// Lists every project with its creator and tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Forbidden`] for non-admin actors and a
    /// repository error when lookup fails.
    pub async fn list(&self, actor: &Actor) -> ProjectServiceResult<Vec<ProjectOverview>> {
        require_admin(actor)?;
        let projects = self.projects.list().await?;
        let mut users = UserCache::default();
        let mut overviews = Vec::with_capacity(projects.len());

        for project in projects {
            let creator = users.resolve(&*self.users, project.created_by()).await?;
            let tasks = self.tasks.find_by_project(project.id()).await?;
            overviews.push(ProjectOverview {
                project,
                creator,
                tasks,
            });
        }
        Ok(overviews)
    }

    /// Shows one project with its tasks and their assignees.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Forbidden`] for non-admin actors and
    /// [`ProjectServiceError::NotFound`] when the project does not exist.
    pub async fn show(&self, actor: &Actor, id: ProjectId) -> ProjectServiceResult<ProjectDetail> {
        require_admin(actor)?;
        let project = self
            .projects
            .find_by_id(id)
            .await?
            .ok_or(ProjectServiceError::NotFound(id))?;
        let project_tasks = self.tasks.find_by_project(id).await?;
        let mut users = UserCache::default();
        let mut tasks = Vec::with_capacity(project_tasks.len());

        for task in project_tasks {
            let assignee = users.resolve(&*self.users, task.assigned_to()).await?;
            tasks.push(AssignedTask { task, assignee });
        }
        Ok(ProjectDetail { project, tasks })
    }

    /// Deletes a project together with its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Forbidden`] for non-admin actors and
    /// [`ProjectServiceError::NotFound`] when the project does not exist.
    pub async fn delete(&self, actor: &Actor, id: ProjectId) -> ProjectServiceResult<()> {
        require_admin(actor)?;
        if self.projects.find_by_id(id).await?.is_none() {
            return Err(ProjectServiceError::NotFound(id));
        }
        let removed_tasks = self.tasks.delete_by_project(id).await?;
        self.projects.delete(id).await.map_err(|err| match err {
            ProjectRepositoryError::NotFound(missing) => ProjectServiceError::NotFound(missing),
            other => ProjectServiceError::Repository(other),
        })?;
        tracing::info!(project_id = %id, removed_tasks, "deleted project");
        Ok(())
    }
}

const fn require_admin(actor: &Actor) -> ProjectServiceResult<()> {
    if actor.can_manage_projects() {
        Ok(())
    } else {
        Err(ProjectServiceError::Forbidden)
    }
}

#[derive(Default)]
struct UserCache {
    known: HashMap<UserId, Option<User>>,
}

impl UserCache {
    async fn resolve<U: UserRepository + ?Sized>(
        &mut self,
        users: &U,
        id: UserId,
    ) -> Result<Option<User>, UserRepositoryError> {
        if let Some(found) = self.known.get(&id) {
            return Ok(found.clone());
        }
        let found = users.find_by_id(id).await?;
        self.known.insert(id, found.clone());
        Ok(found)
    }
}
