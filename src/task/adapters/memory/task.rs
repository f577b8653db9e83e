//! In-memory repository for task records.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::identity::domain::UserId;
use crate::project::domain::ProjectId;
use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn select(&self, predicate: impl Fn(&Task) -> bool) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut selected: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| predicate(task))
            .cloned()
            .collect();
        selected.sort_by_key(|task| (task.created_at(), task.id().into_inner()));
        Ok(selected)
    }
}

fn lock_error(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *stored = task.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_by_assignee(&self, user: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.select(|task| task.assigned_to() == user)
    }

    async fn find_by_project(&self, project: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.select(|task| task.project_id() == project)
    }

    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        self.select(|task| task.status() == status)
    }

    async fn mark_open_overdue_before(
        &self,
        today: NaiveDate,
        at: DateTime<Utc>,
    ) -> TaskRepositoryResult<u64> {
        let mut state = self.state.write().map_err(lock_error)?;
        let marked = state
            .tasks
            .values_mut()
            .map(|task| task.mark_overdue(today, at))
            .filter(|changed| *changed)
            .count();
        Ok(u64::try_from(marked).unwrap_or(u64::MAX))
    }

    async fn count_by_status(&self) -> TaskRepositoryResult<BTreeMap<TaskStatus, u64>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut counts = BTreeMap::new();
        for task in state.tasks.values() {
            *counts.entry(task.status()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn delete_by_project(&self, project: ProjectId) -> TaskRepositoryResult<u64> {
        let mut state = self.state.write().map_err(lock_error)?;
        let before = state.tasks.len();
        state.tasks.retain(|_, task| task.project_id() != project);
        let removed = before - state.tasks.len();
        Ok(u64::try_from(removed).unwrap_or(u64::MAX))
    }
}
