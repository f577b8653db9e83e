//! Route table.

use axum::{
    Router,
    routing::{get, post, put},
};

use super::{
    error::ApiError,
    handlers::{auth, overdue, projects, tasks},
    state::AppState,
};

/// Builds the application router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .route("/my-tasks", get(tasks::my_tasks))
        .route("/tasks", post(tasks::create_task))
        .route("/tasks/{id}", put(tasks::update_task_status))
        .route("/projects", get(projects::list).post(projects::create))
        .route(
            "/projects/{id}",
            get(projects::show).delete(projects::delete),
        )
        .route("/mark-overdue", post(overdue::mark_overdue))
        .route("/overdue-tasks", get(overdue::list_overdue))
        .route("/stats", get(overdue::stats))
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not Found")
}
