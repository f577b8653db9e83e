//! Task creation, status updates, and the caller's task list.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use uuid::Uuid;

use crate::http::{
    auth::{AdminActor, Authenticated},
    dto::{CreateTaskBody, MyTaskResponse, ProjectResponse, TaskResponse, UpdateTaskStatusBody},
    error::ApiError,
    state::AppState,
};
use crate::identity::domain::UserId;
use crate::project::domain::ProjectId;
use crate::task::{
    domain::TaskId,
    services::{CreateTaskRequest, UpdateTaskStatusRequest},
};

/// `GET /my-tasks`: tasks assigned to the caller, with project and the
/// statuses the caller may pick next.
///
/// # Errors
///
/// Returns 401 for unauthenticated callers.
pub async fn my_tasks(
    State(state): State<AppState>,
    caller: Authenticated,
) -> Result<Json<Vec<MyTaskResponse>>, ApiError> {
    let listed = state.tasks().tasks_for(&caller.actor).await?;
    let body = listed
        .iter()
        .map(|entry| MyTaskResponse {
            task: TaskResponse::from(&entry.task),
            project: entry.project.as_ref().map(ProjectResponse::from),
            available_statuses: state.tasks().available_statuses(&caller.actor, &entry.task),
        })
        .collect();
    Ok(Json(body))
}

/// `POST /tasks`: creates a task (admin only).
///
/// # Errors
///
/// Returns 403 for non-admins and 422 for invalid fields or unknown project
/// or assignee.
pub async fn create_task(
    State(state): State<AppState>,
    AdminActor(actor): AdminActor,
    payload: Result<Json<CreateTaskBody>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    let Json(body) = payload?;
    let mut request = CreateTaskRequest::new(
        ProjectId::from_uuid(body.project_id),
        UserId::from_uuid(body.assigned_to),
        body.title,
        body.due_date,
    );
    if let Some(description) = body.description {
        request = request.with_description(description);
    }
    if let Some(priority) = body.priority {
        request = request.with_priority(priority);
    }

    let task = state.tasks().create_task(&actor, request).await?;
    Ok((StatusCode::CREATED, Json(TaskResponse::from(&task))))
}

/// `PUT /tasks/{id}`: changes a task's status under the status policy.
///
/// # Errors
///
/// Returns 403 when the caller is neither admin nor assignee or a non-admin
/// tries to close an overdue task, 422 for a missing or unknown status or a
/// refused transition, and 404 for an unknown task.
pub async fn update_task_status(
    State(state): State<AppState>,
    caller: Authenticated,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateTaskStatusBody>, JsonRejection>,
) -> Result<Json<TaskResponse>, ApiError> {
    let Path(id) = path.map_err(|_| ApiError::not_found("Task not found"))?;
    let Json(body) = payload?;
    let status = body
        .status
        .ok_or_else(|| ApiError::unprocessable("The status field is required."))?;

    let task = state
        .tasks()
        .update_status(
            &caller.actor,
            UpdateTaskStatusRequest::new(TaskId::from_uuid(id), status),
        )
        .await?;
    Ok(Json(TaskResponse::from(&task)))
}
