//! Repository port for task persistence and lookup.

use crate::identity::domain::UserId;
use crate::project::domain::ProjectId;
use crate::task::domain::{Task, TaskId, TaskStatus};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Listing methods return tasks ordered by creation time.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task (status and timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all tasks assigned to `user`.
    async fn find_by_assignee(&self, user: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns all tasks belonging to `project`.
    async fn find_by_project(&self, project: ProjectId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns all tasks currently in `status`.
    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>>;

    /// Moves every `TODO` or `WIP` task due before `today` into `OVERDUE`,
    /// stamping `at` as its update time, and returns how many changed.
    ///
    /// The status check and the write happen as one step, so a task closed
    /// or deleted concurrently is never reopened as `OVERDUE`.
    async fn mark_open_overdue_before(
        &self,
        today: NaiveDate,
        at: DateTime<Utc>,
    ) -> TaskRepositoryResult<u64>;

    /// Counts tasks per status. Statuses with no tasks may be absent.
    async fn count_by_status(&self) -> TaskRepositoryResult<BTreeMap<TaskStatus, u64>>;

    /// Deletes every task belonging to `project` and returns how many were
    /// removed.
    async fn delete_by_project(&self, project: ProjectId) -> TaskRepositoryResult<u64>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
