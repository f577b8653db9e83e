//! Application services for task lifecycle orchestration.

mod lifecycle;
mod overdue;

pub use lifecycle::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
    TaskWithProject, UpdateTaskStatusRequest,
};
pub use overdue::{OverdueError, OverdueResult, OverdueService, TaskStats};
