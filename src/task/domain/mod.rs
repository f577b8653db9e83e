//! Domain model for tasks and their status lifecycle.
//!
//! The status policy in [`TaskStatusPolicy`] is the only place where task
//! transitions are decided; everything outside the domain boundary only
//! loads, asks, and stores.

mod error;
mod ids;
mod policy;
mod priority;
mod status;
mod task;

pub use error::{
    ParseProgressionError, ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError,
};
pub use ids::{TaskId, TaskTitle};
pub use policy::{Decision, DenialKind, DenyReason, Progression, TaskStatusPolicy};
pub use priority::TaskPriority;
pub use status::TaskStatus;
pub use task::{DUE_DATE_FORMAT, PersistedTaskData, Task, TaskDraft, parse_due_date};
