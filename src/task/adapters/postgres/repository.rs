//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::database::PgPool;
use crate::identity::domain::UserId;
use crate::project::domain::ProjectId;
use crate::task::{
    domain::{PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::dsl::count_star;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::BTreeMap;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let status = task.status().as_str().to_owned();
        let updated_at = task.updated_at();

        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                .set((tasks::status.eq(status), tasks::updated_at.eq(updated_at)))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_assignee(&self, user: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::assigned_to.eq(user.into_inner()))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_by_project(&self, project: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::project_id.eq(project.into_inner()))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::status.eq(status.as_str()))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn mark_open_overdue_before(
        &self,
        today: NaiveDate,
        at: DateTime<Utc>,
    ) -> TaskRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let open = vec![TaskStatus::Todo.as_str(), TaskStatus::Wip.as_str()];
            let marked = diesel::update(
                tasks::table
                    .filter(tasks::status.eq_any(open))
                    .filter(tasks::due_date.lt(today)),
            )
            .set((
                tasks::status.eq(TaskStatus::Overdue.as_str()),
                tasks::updated_at.eq(at),
            ))
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;
            u64::try_from(marked).map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn count_by_status(&self) -> TaskRepositoryResult<BTreeMap<TaskStatus, u64>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .group_by(tasks::status)
                .select((tasks::status, count_star()))
                .load::<(String, i64)>(connection)
                .map_err(TaskRepositoryError::persistence)?;

            let mut counts = BTreeMap::new();
            for (raw_status, count) in rows {
                let status = TaskStatus::try_from(raw_status.as_str())
                    .map_err(TaskRepositoryError::persistence)?;
                let total = u64::try_from(count).map_err(TaskRepositoryError::persistence)?;
                counts.insert(status, total);
            }
            Ok(counts)
        })
        .await
    }

    async fn delete_by_project(&self, project: ProjectId) -> TaskRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let removed =
                diesel::delete(tasks::table.filter(tasks::project_id.eq(project.into_inner())))
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;
            u64::try_from(removed).map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        project_id: task.project_id().into_inner(),
        assigned_to: task.assigned_to().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        due_date: task.due_date(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let title = TaskTitle::new(row.title).map_err(TaskRepositoryError::persistence)?;
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let priority =
        TaskPriority::try_from(row.priority.as_str()).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        assigned_to: UserId::from_uuid(row.assigned_to),
        title,
        description: row.description,
        status,
        priority,
        due_date: row.due_date,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
