//! Mapping from service errors to JSON error responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::identity::{domain::IdentityDomainError, services::AuthError};
use crate::project::services::ProjectServiceError;
use crate::task::{
    domain::{DenialKind, TaskDomainError},
    services::{OverdueError, TaskLifecycleError},
};

const SERVER_ERROR: &str = "Server Error";

/// An error response: a status code and a `{ "message": ... }` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
}

impl ApiError {
    /// Creates an error response.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 401 for a missing, unknown, or revoked bearer token.
    #[must_use]
    pub fn unauthenticated() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthenticated.")
    }

    /// 403 for an actor lacking the required role.
    #[must_use]
    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, "Forbidden")
    }

    /// 404 with the given message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 422 with the given message.
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    /// 500 with a generic message. The cause is logged, never returned.
    pub fn internal(cause: &dyn std::error::Error) -> Self {
        tracing::error!(error = %cause, "request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR)
    }

    /// Returns the response status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the response message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            message: &self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => {
                Self::new(StatusCode::UNAUTHORIZED, "Invalid credentials")
            }
            AuthError::Unauthenticated => Self::unauthenticated(),
            AuthError::Domain(IdentityDomainError::PasswordHashing(_))
            | AuthError::Repository(_)
            | AuthError::Session(_) => Self::internal(&err),
            AuthError::Domain(domain) => Self::unprocessable(domain.to_string()),
        }
    }
}

impl From<TaskDomainError> for ApiError {
    fn from(err: TaskDomainError) -> Self {
        match err {
            TaskDomainError::TransitionDenied { reason, .. } => match reason.kind() {
                DenialKind::Authorization => Self::new(StatusCode::FORBIDDEN, reason.message()),
                DenialKind::StateTransition => Self::unprocessable(reason.message()),
            },
            TaskDomainError::EmptyTitle | TaskDomainError::InvalidDueDate(_) => {
                Self::unprocessable(err.to_string())
            }
        }
    }
}

impl From<TaskLifecycleError> for ApiError {
    fn from(err: TaskLifecycleError) -> Self {
        match err {
            TaskLifecycleError::Domain(domain) => domain.into(),
            TaskLifecycleError::InvalidStatus(_) => {
                Self::unprocessable("The selected status is invalid.")
            }
            TaskLifecycleError::InvalidPriority(_) => {
                Self::unprocessable("The selected priority is invalid.")
            }
            TaskLifecycleError::ProjectNotFound(_) => {
                Self::unprocessable("The selected project id is invalid.")
            }
            TaskLifecycleError::AssigneeNotFound(_) => {
                Self::unprocessable("The selected assigned to is invalid.")
            }
            TaskLifecycleError::Forbidden => Self::forbidden(),
            TaskLifecycleError::TaskNotFound(_) => Self::not_found("Task not found"),
            TaskLifecycleError::Repository(_)
            | TaskLifecycleError::ProjectRepository(_)
            | TaskLifecycleError::UserRepository(_) => Self::internal(&err),
        }
    }
}

impl From<ProjectServiceError> for ApiError {
    fn from(err: ProjectServiceError) -> Self {
        match err {
            ProjectServiceError::Forbidden => Self::forbidden(),
            ProjectServiceError::NotFound(_) => Self::not_found("Project not found"),
            ProjectServiceError::Domain(domain) => Self::unprocessable(domain.to_string()),
            ProjectServiceError::Repository(_)
            | ProjectServiceError::TaskRepository(_)
            | ProjectServiceError::UserRepository(_) => Self::internal(&err),
        }
    }
}

impl From<OverdueError> for ApiError {
    fn from(err: OverdueError) -> Self {
        match err {
            OverdueError::Forbidden => Self::forbidden(),
            OverdueError::Repository(_) => Self::internal(&err),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}
