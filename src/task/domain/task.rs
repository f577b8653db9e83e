//! Task aggregate root.

use super::{
    Decision, TaskDomainError, TaskId, TaskPriority, TaskStatus, TaskStatusPolicy, TaskTitle,
};
use crate::identity::domain::{Actor, UserId};
use crate::project::domain::ProjectId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Wire and storage format of due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` due date.
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidDueDate`] when the value is not a valid
/// calendar date in that format.
pub fn parse_due_date(value: &str) -> Result<NaiveDate, TaskDomainError> {
    NaiveDate::parse_from_str(value.trim(), DUE_DATE_FORMAT)
        .map_err(|_| TaskDomainError::InvalidDueDate(value.to_owned()))
}

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    project_id: ProjectId,
    assigned_to: UserId,
    title: TaskTitle,
    description: Option<String>,
    priority: TaskPriority,
    due_date: NaiveDate,
}

impl TaskDraft {
    /// Creates a draft with the required fields and default priority.
    #[must_use]
    pub const fn new(
        project_id: ProjectId,
        assigned_to: UserId,
        title: TaskTitle,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            project_id,
            assigned_to,
            title,
            description: None,
            priority: TaskPriority::Medium,
            due_date,
        }
    }

    /// Sets the description. Blank descriptions are dropped.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let text = description.into();
        self.description = (!text.trim().is_empty()).then_some(text);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    assigned_to: UserId,
    title: TaskTitle,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Assigned user.
    pub assigned_to: UserId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted due date.
    pub due_date: NaiveDate,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `TODO` task from a draft.
    #[must_use]
    pub fn new(draft: TaskDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            project_id: draft.project_id,
            assigned_to: draft.assigned_to,
            title: draft.title,
            description: draft.description,
            status: TaskStatus::Todo,
            priority: draft.priority,
            due_date: draft.due_date,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            assigned_to: data.assigned_to,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            due_date: data.due_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the assigned user.
    #[must_use]
    pub const fn assigned_to(&self) -> UserId {
        self.assigned_to
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the due date lies strictly before `today`.
    #[must_use]
    pub fn is_past_due(&self, today: NaiveDate) -> bool {
        self.due_date < today
    }

    /// Changes the status on behalf of `actor` when `policy` allows it.
    ///
    /// Only the status and `updated_at` change; the task is left untouched on
    /// refusal.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TransitionDenied`] carrying the policy's
    /// reason when the change is refused.
    pub fn change_status(
        &mut self,
        requested: TaskStatus,
        actor: &Actor,
        policy: &TaskStatusPolicy,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        match policy.decide(self.status, requested, actor, self.assigned_to) {
            Decision::Allow => {
                self.status = requested;
                self.touch(clock);
                Ok(())
            }
            Decision::Deny(reason) => Err(TaskDomainError::TransitionDenied {
                task_id: self.id,
                from: self.status,
                to: requested,
                reason,
            }),
        }
    }

    /// Moves an open task whose due date has passed into `OVERDUE`.
    ///
    /// Returns whether the status changed. `DONE` and `OVERDUE` tasks, and
    /// tasks due today or later, are left alone. `at` becomes the update time
    /// so a whole sweep shares one timestamp.
    pub fn mark_overdue(&mut self, today: NaiveDate, at: DateTime<Utc>) -> bool {
        if !self.status.is_open() || !self.is_past_due(today) {
            return false;
        }
        self.status = TaskStatus::Overdue;
        self.updated_at = at;
        true
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
