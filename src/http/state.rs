//! Shared application state and service wiring.

use std::sync::Arc;

use mockable::DefaultClock;

use crate::database::PgPool;
use crate::identity::{
    adapters::{
        memory::{InMemorySessionStore, InMemoryUserRepository},
        postgres::PostgresUserRepository,
    },
    ports::{SessionStore, UserRepository},
    services::AuthService,
};
use crate::project::{
    adapters::{memory::InMemoryProjectRepository, postgres::PostgresProjectRepository},
    ports::ProjectRepository,
    services::ProjectService,
};
use crate::task::{
    adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
    domain::TaskStatusPolicy,
    ports::TaskRepository,
    services::{OverdueService, TaskLifecycleService},
};

/// Authentication service over type-erased storage.
pub type Auth = AuthService<dyn UserRepository, dyn SessionStore, DefaultClock>;

/// Task lifecycle service over type-erased storage.
pub type TaskLifecycle =
    TaskLifecycleService<dyn TaskRepository, dyn ProjectRepository, dyn UserRepository, DefaultClock>;

/// Project service over type-erased storage.
pub type Projects =
    ProjectService<dyn ProjectRepository, dyn TaskRepository, dyn UserRepository, DefaultClock>;

/// Overdue service over type-erased storage.
pub type Overdue = OverdueService<dyn TaskRepository, DefaultClock>;

/// The storage backends the application runs on.
#[derive(Clone)]
pub struct Repositories {
    /// User accounts.
    pub users: Arc<dyn UserRepository>,
    /// Bearer sessions.
    pub sessions: Arc<dyn SessionStore>,
    /// Projects.
    pub projects: Arc<dyn ProjectRepository>,
    /// Tasks.
    pub tasks: Arc<dyn TaskRepository>,
}

impl Repositories {
    /// Volatile in-process storage.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            sessions: Arc::new(InMemorySessionStore::new()),
            projects: Arc::new(InMemoryProjectRepository::new()),
            tasks: Arc::new(InMemoryTaskRepository::new()),
        }
    }

    /// PostgreSQL storage for users, projects, and tasks. Sessions stay in
    /// process memory.
    #[must_use]
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            sessions: Arc::new(InMemorySessionStore::new()),
            projects: Arc::new(PostgresProjectRepository::new(pool.clone())),
            tasks: Arc::new(PostgresTaskRepository::new(pool.clone())),
        }
    }

    /// Replaces the session store, keeping the other backends.
    #[must_use]
    pub fn with_sessions(self, sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions, ..self }
    }
}

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    auth: Arc<Auth>,
    tasks: Arc<TaskLifecycle>,
    projects: Arc<Projects>,
    overdue: Arc<Overdue>,
}

impl AppState {
    /// Wires the services over `repositories`, enforcing `policy` on status
    /// changes.
    #[must_use]
    pub fn new(repositories: &Repositories, policy: TaskStatusPolicy) -> Self {
        let clock = Arc::new(DefaultClock);
        let auth = AuthService::new(
            Arc::clone(&repositories.users),
            Arc::clone(&repositories.sessions),
            Arc::clone(&clock),
        );
        let tasks = TaskLifecycleService::new(
            Arc::clone(&repositories.tasks),
            Arc::clone(&repositories.projects),
            Arc::clone(&repositories.users),
            Arc::clone(&clock),
            policy,
        );
        let projects = ProjectService::new(
            Arc::clone(&repositories.projects),
            Arc::clone(&repositories.tasks),
            Arc::clone(&repositories.users),
            Arc::clone(&clock),
        );
        let overdue = OverdueService::new(Arc::clone(&repositories.tasks), clock);
        Self {
            auth: Arc::new(auth),
            tasks: Arc::new(tasks),
            projects: Arc::new(projects),
            overdue: Arc::new(overdue),
        }
    }

    /// Authentication service.
    #[must_use]
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Task lifecycle service.
    #[must_use]
    pub fn tasks(&self) -> &TaskLifecycle {
        &self.tasks
    }

    /// Project service.
    #[must_use]
    pub fn projects(&self) -> &Projects {
        &self.projects
    }

    /// Overdue sweep and statistics service.
    #[must_use]
    pub fn overdue(&self) -> &Overdue {
        &self.overdue
    }

    /// Returns a shared handle to the overdue service for background use.
    #[must_use]
    pub fn overdue_handle(&self) -> Arc<Overdue> {
        Arc::clone(&self.overdue)
    }
}
