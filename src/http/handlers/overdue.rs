//! Overdue sweep and board statistics endpoints (admin only).

use axum::{Json, extract::State};

use crate::http::{
    auth::AdminActor,
    dto::{MarkOverdueResponse, TaskResponse},
    error::ApiError,
    state::AppState,
};
use crate::task::services::TaskStats;

/// `POST /mark-overdue`: runs the overdue sweep now.
///
/// # Errors
///
/// Returns 403 for non-admins.
pub async fn mark_overdue(
    State(state): State<AppState>,
    AdminActor(actor): AdminActor,
) -> Result<Json<MarkOverdueResponse>, ApiError> {
    let marked = state.overdue().mark_overdue(&actor).await?;
    Ok(Json(MarkOverdueResponse { marked }))
}

/// `GET /overdue-tasks`: tasks currently in `OVERDUE`.
///
/// # Errors
///
/// Returns 403 for non-admins.
pub async fn list_overdue(
    State(state): State<AppState>,
    AdminActor(actor): AdminActor,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let tasks = state.overdue().list_overdue(&actor).await?;
    Ok(Json(tasks.iter().map(TaskResponse::from).collect()))
}

/// `GET /stats`: task counts per status.
///
/// # Errors
///
/// Returns 403 for non-admins.
pub async fn stats(
    State(state): State<AppState>,
    AdminActor(actor): AdminActor,
) -> Result<Json<TaskStats>, ApiError> {
    Ok(Json(state.overdue().stats(&actor).await?))
}
