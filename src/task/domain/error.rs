//! Error types for task domain validation and parsing.

use super::{DenyReason, TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The due date is not a `YYYY-MM-DD` calendar date.
    #[error("invalid due date '{0}', expected YYYY-MM-DD")]
    InvalidDueDate(String),

    /// The status policy refused the requested transition.
    #[error("task {task_id} cannot move from {from} to {to}: {reason}")]
    TransitionDenied {
        /// Task whose status change was refused.
        task_id: TaskId,
        /// Status before the request.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
        /// Why the policy refused.
        reason: DenyReason,
    },
}

/// Error returned while parsing a task status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing a task priority.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

/// Error returned while parsing a progression mode.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown progression mode: {0}")]
pub struct ParseProgressionError(pub String);
