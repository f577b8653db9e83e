//! Project administration endpoints (admin only).

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
    auth::AdminActor,
    dto::{
        CreateProjectBody, MessageResponse, ProjectDetailResponse, ProjectOverviewResponse,
        ProjectResponse, ProjectTaskResponse, TaskResponse, UserResponse,
    },
    error::ApiError,
    state::AppState,
};
use crate::project::{domain::ProjectId, services::CreateProjectRequest};

fn project_id(path: Result<Path<Uuid>, PathRejection>) -> Result<ProjectId, ApiError> {
    path.map(|Path(id)| ProjectId::from_uuid(id))
        .map_err(|_| ApiError::not_found("Project not found"))
}

/// `GET /projects`: every project with its creator and tasks.
///
/// # Errors
///
/// Returns 403 for non-admins.
pub async fn list(
    State(state): State<AppState>,
    AdminActor(actor): AdminActor,
) -> Result<Json<Vec<ProjectOverviewResponse>>, ApiError> {
    let overviews = state.projects().list(&actor).await?;
    let body = overviews
        .iter()
        .map(|overview| ProjectOverviewResponse {
            project: ProjectResponse::from(&overview.project),
            creator: overview.creator.as_ref().map(UserResponse::from),
            tasks: overview.tasks.iter().map(TaskResponse::from).collect(),
        })
        .collect();
    Ok(Json(body))
}

/// `POST /projects`: creates a project owned by the caller.
///
/// # Errors
///
/// Returns 403 for non-admins and 422 for a blank name.
pub async fn create(
    State(state): State<AppState>,
    AdminActor(actor): AdminActor,
    payload: Result<Json<CreateProjectBody>, JsonRejection>,
) -> Result<(StatusCode, Json<ProjectResponse>), ApiError> {
    let Json(body) = payload?;
    let mut request = CreateProjectRequest::new(body.name);
    if let Some(description) = body.description {
        request = request.with_description(description);
    }
    let project = state.projects().create(&actor, request).await?;
    Ok((StatusCode::CREATED, Json(ProjectResponse::from(&project))))
}

/// `GET /projects/{id}`: a project with its tasks, their assignees, and the
/// statuses the caller may pick for each.
///
/// # Errors
///
/// Returns 403 for non-admins and 404 for an unknown project.
pub async fn show(
    State(state): State<AppState>,
    AdminActor(actor): AdminActor,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ProjectDetailResponse>, ApiError> {
    let id = project_id(path)?;
    let detail = state.projects().show(&actor, id).await?;
    let tasks = detail
        .tasks
        .iter()
        .map(|entry| ProjectTaskResponse {
            task: TaskResponse::from(&entry.task),
            assignee: entry.assignee.as_ref().map(UserResponse::from),
            available_statuses: state.tasks().available_statuses(&actor, &entry.task),
        })
        .collect();
    Ok(Json(ProjectDetailResponse {
        project: ProjectResponse::from(&detail.project),
        tasks,
    }))
}

/// `DELETE /projects/{id}`: deletes a project and its tasks.
///
/// # Errors
///
/// Returns 403 for non-admins and 404 for an unknown project.
pub async fn delete(
    State(state): State<AppState>,
    AdminActor(actor): AdminActor,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = project_id(path)?;
    state.projects().delete(&actor, id).await?;
    Ok(Json(MessageResponse::new("Deleted")))
}
