//! Service layer for task creation, status updates, and per-user listing.

use crate::identity::{
    domain::{Actor, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use crate::project::{
    domain::{Project, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::{
    domain::{
        ParseTaskPriorityError, ParseTaskStatusError, Task, TaskDomainError, TaskDraft, TaskId,
        TaskPriority, TaskStatus, TaskStatusPolicy, TaskTitle, parse_due_date,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    assigned_to: UserId,
    title: String,
    description: Option<String>,
    priority: Option<String>,
    due_date: String,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        assigned_to: UserId,
        title: impl Into<String>,
        due_date: impl Into<String>,
    ) -> Self {
        Self {
            project_id,
            assigned_to,
            title: title.into(),
            description: None,
            priority: None,
            due_date: due_date.into(),
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the task priority as given by the caller.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

/// Request payload for changing a task's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskStatusRequest {
    task_id: TaskId,
    status: String,
}

impl UpdateTaskStatusRequest {
    /// Creates a status update request.
    #[must_use]
    pub fn new(task_id: TaskId, status: impl Into<String>) -> Self {
        Self {
            task_id,
            status: status.into(),
        }
    }
}

/// A task together with the project it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskWithProject {
    /// The task.
    pub task: Task,
    /// Its project, if it still exists.
    pub project: Option<Project>,
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed or the status policy refused the change.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The requested status is not a known status.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
    /// The requested priority is not a known priority.
    #[error(transparent)]
    InvalidPriority(#[from] ParseTaskPriorityError),
    /// The actor lacks the role required for the operation.
    #[error("forbidden")]
    Forbidden,
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The referenced project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The referenced assignee does not exist.
    #[error("assignee not found: {0}")]
    AssigneeNotFound(UserId),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Project lookup failed.
    #[error(transparent)]
    ProjectRepository(#[from] ProjectRepositoryError),
    /// User lookup failed.
    #[error(transparent)]
    UserRepository(#[from] UserRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, P, U, C>
where
    R: TaskRepository + ?Sized,
    P: ProjectRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    projects: Arc<P>,
    users: Arc<U>,
    clock: Arc<C>,
    policy: TaskStatusPolicy,
}

impl<R, P, U, C> TaskLifecycleService<R, P, U, C>
where
    R: TaskRepository + ?Sized,
    P: ProjectRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(
        tasks: Arc<R>,
        projects: Arc<P>,
        users: Arc<U>,
        clock: Arc<C>,
        policy: TaskStatusPolicy,
    ) -> Self {
        Self {
            tasks,
            projects,
            users,
            clock,
            policy,
        }
    }

    /// Returns the status policy this service enforces.
    #[must_use]
    pub const fn policy(&self) -> TaskStatusPolicy {
        self.policy
    }

    /// Creates a `TODO` task in an existing project for an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Forbidden`] for non-admin actors,
    /// validation errors for a blank title, unknown priority, or malformed
    /// due date, and [`TaskLifecycleError::ProjectNotFound`] /
    /// [`TaskLifecycleError::AssigneeNotFound`] for dangling references.
    pub async fn create_task(
        &self,
        actor: &Actor,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        if !actor.can_manage_projects() {
            return Err(TaskLifecycleError::Forbidden);
        }

        let CreateTaskRequest {
            project_id,
            assigned_to,
            title,
            description,
            priority,
            due_date,
        } = request;

        let validated_title = TaskTitle::new(title)?;
        let parsed_due_date = parse_due_date(&due_date)?;
        let parsed_priority = priority
            .as_deref()
            .map(TaskPriority::try_from)
            .transpose()?
            .unwrap_or_default();

        if self.projects.find_by_id(project_id).await?.is_none() {
            return Err(TaskLifecycleError::ProjectNotFound(project_id));
        }
        if self.users.find_by_id(assigned_to).await?.is_none() {
            return Err(TaskLifecycleError::AssigneeNotFound(assigned_to));
        }

        let mut draft = TaskDraft::new(project_id, assigned_to, validated_title, parsed_due_date)
            .with_priority(parsed_priority);
        if let Some(text) = description {
            draft = draft.with_description(text);
        }

        let task = Task::new(draft, &*self.clock);
        self.tasks.store(&task).await?;
        tracing::info!(
            task_id = %task.id(),
            project_id = %project_id,
            assigned_to = %assigned_to,
            "created task"
        );
        Ok(task)
    }

    /// Changes a task's status when the status policy allows it.
    ///
    /// The stored task is left unmodified on any error.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidStatus`] for an unknown status,
    /// [`TaskLifecycleError::TaskNotFound`] for a missing task, and
    /// [`TaskDomainError::TransitionDenied`] (wrapped in
    /// [`TaskLifecycleError::Domain`]) when the policy refuses.
    pub async fn update_status(
        &self,
        actor: &Actor,
        request: UpdateTaskStatusRequest,
    ) -> TaskLifecycleResult<Task> {
        let requested = TaskStatus::try_from(request.status.as_str())?;
        let mut task = self
            .tasks
            .find_by_id(request.task_id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(request.task_id))?;
        let previous = task.status();

        if let Err(err) = task.change_status(requested, actor, &self.policy, &*self.clock) {
            tracing::warn!(
                task_id = %request.task_id,
                actor = %actor.id(),
                from = %previous,
                to = %requested,
                error = %err,
                "refused status change"
            );
            return Err(err.into());
        }

        self.tasks.update(&task).await?;
        tracing::info!(
            task_id = %task.id(),
            actor = %actor.id(),
            from = %previous,
            to = %requested,
            "changed task status"
        );
        Ok(task)
    }

    /// Returns the tasks assigned to `actor`, each with its project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when a repository lookup fails.
    pub async fn tasks_for(&self, actor: &Actor) -> TaskLifecycleResult<Vec<TaskWithProject>> {
        let tasks = self.tasks.find_by_assignee(actor.id()).await?;
        let mut projects: HashMap<ProjectId, Option<Project>> = HashMap::new();
        let mut listed = Vec::with_capacity(tasks.len());

        for task in tasks {
            let project_id = task.project_id();
            if !projects.contains_key(&project_id) {
                let found = self.projects.find_by_id(project_id).await?;
                projects.insert(project_id, found);
            }
            let project = projects.get(&project_id).cloned().flatten();
            listed.push(TaskWithProject { task, project });
        }
        Ok(listed)
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.tasks.find_by_id(id).await?)
    }

    /// Lists the statuses `actor` may pick for `task`.
    #[must_use]
    pub fn available_statuses(&self, actor: &Actor, task: &Task) -> Vec<TaskStatus> {
        self.policy
            .available_statuses(task.status(), actor, task.assigned_to())
    }
}
