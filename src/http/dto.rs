//! Request bodies and response payloads.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::domain::{Role, User};
use crate::project::domain::Project;
use crate::task::domain::{Task, TaskPriority, TaskStatus};

/// `POST /login` body.
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// `POST /projects` body.
#[derive(Debug, Deserialize)]
pub struct CreateProjectBody {
    /// Project name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// `POST /tasks` body.
#[derive(Debug, Deserialize)]
pub struct CreateTaskBody {
    /// Owning project.
    pub project_id: Uuid,
    /// Assigned user.
    pub assigned_to: Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// `LOW`, `MEDIUM`, or `HIGH`; defaults to `MEDIUM`.
    #[serde(default)]
    pub priority: Option<String>,
    /// `YYYY-MM-DD`.
    pub due_date: String,
}

/// `PUT /tasks/{id}` body.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskStatusBody {
    /// Requested status.
    #[serde(default)]
    pub status: Option<String>,
}

/// A user account as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    /// Account identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role.
    pub role: Role,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().into_inner(),
            name: user.name().to_owned(),
            email: user.email().as_str().to_owned(),
            role: user.role(),
        }
    }
}

/// `POST /login` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for later requests.
    pub token: String,
    /// The logged-in account.
    pub user: UserResponse,
}

/// A plain `{ "message": ... }` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A project as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectResponse {
    /// Project identifier.
    pub id: Uuid,
    /// Name.
    pub name: String,
    /// Description, if any.
    pub description: Option<String>,
    /// Creating user.
    pub created_by: Uuid,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Latest update time.
    pub updated_at: DateTime<Utc>,
}

impl From<&Project> for ProjectResponse {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id().into_inner(),
            name: project.name().as_str().to_owned(),
            description: project.description().map(str::to_owned),
            created_by: project.created_by().into_inner(),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        }
    }
}

/// A task as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    /// Task identifier.
    pub id: Uuid,
    /// Owning project.
    pub project_id: Uuid,
    /// Assigned user.
    pub assigned_to: Uuid,
    /// Title.
    pub title: String,
    /// Description, if any.
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Urgency.
    pub priority: TaskPriority,
    /// Due date.
    pub due_date: NaiveDate,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Latest update time.
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().into_inner(),
            project_id: task.project_id().into_inner(),
            assigned_to: task.assigned_to().into_inner(),
            title: task.title().as_str().to_owned(),
            description: task.description().map(str::to_owned),
            status: task.status(),
            priority: task.priority(),
            due_date: task.due_date(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

/// An entry of `GET /my-tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MyTaskResponse {
    /// The task.
    #[serde(flatten)]
    pub task: TaskResponse,
    /// Its project, if it still exists.
    pub project: Option<ProjectResponse>,
    /// Statuses the caller may pick next.
    pub available_statuses: Vec<TaskStatus>,
}

/// An entry of `GET /projects`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectOverviewResponse {
    /// The project.
    #[serde(flatten)]
    pub project: ProjectResponse,
    /// The creating user, if the account still exists.
    pub creator: Option<UserResponse>,
    /// The project's tasks.
    pub tasks: Vec<TaskResponse>,
}

/// A task on `GET /projects/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTaskResponse {
    /// The task.
    #[serde(flatten)]
    pub task: TaskResponse,
    /// The assigned user, if the account still exists.
    pub assignee: Option<UserResponse>,
    /// Statuses the caller may pick next.
    pub available_statuses: Vec<TaskStatus>,
}

/// `GET /projects/{id}` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDetailResponse {
    /// The project.
    #[serde(flatten)]
    pub project: ProjectResponse,
    /// Its tasks.
    pub tasks: Vec<ProjectTaskResponse>,
}

/// `POST /mark-overdue` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkOverdueResponse {
    /// How many tasks moved into `OVERDUE`.
    pub marked: u64,
}
