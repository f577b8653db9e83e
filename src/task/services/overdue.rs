//! Overdue sweep and board statistics.

use crate::identity::domain::Actor;
use crate::task::{
    domain::{Task, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Task counts per status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    /// Count for every status, including those with no tasks.
    pub by_status: BTreeMap<TaskStatus, u64>,
    /// Sum of all counts.
    pub total: u64,
}

impl TaskStats {
    fn from_counts(counts: &BTreeMap<TaskStatus, u64>) -> Self {
        let by_status: BTreeMap<TaskStatus, u64> = TaskStatus::ALL
            .into_iter()
            .map(|status| (status, counts.get(&status).copied().unwrap_or(0)))
            .collect();
        let total = by_status.values().sum();
        Self { by_status, total }
    }

    /// Returns the count for `status`.
    #[must_use]
    pub fn count(&self, status: TaskStatus) -> u64 {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

/// Service-level errors for the overdue sweep and statistics.
#[derive(Debug, Error)]
pub enum OverdueError {
    /// The actor is not an admin.
    #[error("forbidden")]
    Forbidden,
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for overdue service operations.
pub type OverdueResult<T> = Result<T, OverdueError>;

/// Moves past-due open tasks into `OVERDUE` and reports on the board.
#[derive(Clone)]
pub struct OverdueService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> OverdueService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new overdue service.
    #[must_use]
    pub const fn new(tasks: Arc<R>, clock: Arc<C>) -> Self {
        Self { tasks, clock }
    }

    /// Runs the sweep on behalf of an admin.
    ///
    /// # Errors
    ///
    /// Returns [`OverdueError::Forbidden`] for non-admin actors and
    /// [`OverdueError::Repository`] when storage fails.
    pub async fn mark_overdue(&self, actor: &Actor) -> OverdueResult<u64> {
        if !actor.is_admin() {
            return Err(OverdueError::Forbidden);
        }
        self.sweep().await
    }

    /// Moves every `TODO` or `WIP` task due before today into `OVERDUE`.
    ///
    /// Today is the UTC calendar date of the clock. Running the sweep twice
    /// on the same day changes nothing the second time. Returns how many
    /// tasks changed.
    ///
    /// # Errors
    ///
    /// Returns [`OverdueError::Repository`] when storage fails.
    pub async fn sweep(&self) -> OverdueResult<u64> {
        let now = self.clock.utc();
        let today = now.date_naive();
        let changed = self.tasks.mark_open_overdue_before(today, now).await?;

        if changed > 0 {
            tracing::info!(count = changed, %today, "marked tasks overdue");
        } else {
            tracing::debug!(%today, "no tasks became overdue");
        }
        Ok(changed)
    }

    /// Lists tasks currently in `OVERDUE`.
    ///
    /// # Errors
    ///
    /// Returns [`OverdueError::Forbidden`] for non-admin actors and
    /// [`OverdueError::Repository`] when lookup fails.
    pub async fn list_overdue(&self, actor: &Actor) -> OverdueResult<Vec<Task>> {
        if !actor.is_admin() {
            return Err(OverdueError::Forbidden);
        }
        Ok(self.tasks.find_by_status(TaskStatus::Overdue).await?)
    }

    /// Counts tasks per status.
    ///
    /// # Errors
    ///
    /// Returns [`OverdueError::Forbidden`] for non-admin actors and
    /// [`OverdueError::Repository`] when lookup fails.
    pub async fn stats(&self, actor: &Actor) -> OverdueResult<TaskStats> {
        if !actor.is_admin() {
            return Err(OverdueError::Forbidden);
        }
        let counts = self.tasks.count_by_status().await?;
        Ok(TaskStats::from_counts(&counts))
    }
}
