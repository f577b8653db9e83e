//! Shared fixtures for the `PostgreSQL` adapter tests.

pub use super::cluster::{BoxError, PostgresCluster, postgres_cluster};
use super::cluster::ManagedCluster;
use chrono::{DateTime, Local, NaiveDate, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use std::cell::Cell;
use std::future::Future;
use taskboard::database;
use taskboard::identity::{
    adapters::postgres::PostgresUserRepository,
    domain::{EmailAddress, PasswordHash, Role, User},
    ports::UserRepository,
};
use taskboard::project::{
    adapters::postgres::PostgresProjectRepository,
    domain::{Project, ProjectName},
    ports::ProjectRepository,
};
use taskboard::task::{
    adapters::postgres::PostgresTaskRepository,
    domain::{PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus, TaskTitle},
    ports::TaskRepository,
};
use tokio::runtime::Runtime;
use uuid::Uuid;

/// Template database that already carries the schema.
pub const TEMPLATE_DB: &str = "taskboard_test_template";

/// Builds the runtime tests drive the async repositories with.
pub fn test_runtime() -> Result<Runtime, BoxError> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .map_err(|err| Box::new(err) as BoxError)
}

/// Creates the template database and applies the schema once per cluster.
pub fn ensure_template(cluster: &ManagedCluster) -> Result<(), BoxError> {
    let connection = cluster.connection();
    cluster.ensure_template_exists(TEMPLATE_DB, move |db_name| {
        let pool = database::connect(&connection.database_url(db_name), 1)?;
        database::apply_schema(&pool)?;
        Ok(())
    })
}

/// Clock pinned to noon UTC on 2026-03-10, whole seconds so timestamps
/// survive the round trip through `TIMESTAMPTZ`.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(
            Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0)
                .single()
                .expect("valid fixed instant"),
        )
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Database cloned from the template, dropped with the value.
struct TestDatabase {
    cluster: PostgresCluster,
    name: String,
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        drop(self.cluster.drop_database(&self.name));
    }
}

/// Repositories over a fresh database.
///
/// Field order matters: the repositories release their pooled connections
/// before the database is dropped.
pub struct Board {
    pub users: PostgresUserRepository,
    pub projects: PostgresProjectRepository,
    pub tasks: PostgresTaskRepository,
    pub clock: FixedClock,
    rt: Runtime,
    seeded: Cell<i64>,
    _database: TestDatabase,
}

impl Board {
    fn new(cluster: PostgresCluster) -> Result<Self, BoxError> {
        ensure_template(cluster)?;
        let name = format!("test_{}", Uuid::new_v4().simple());
        cluster.create_database_from_template(&name, TEMPLATE_DB)?;
        let url = cluster.connection().database_url(&name);
        let test_database = TestDatabase { cluster, name };
        let pool = database::connect(&url, 2)?;
        Ok(Self {
            users: PostgresUserRepository::new(pool.clone()),
            projects: PostgresProjectRepository::new(pool.clone()),
            tasks: PostgresTaskRepository::new(pool),
            clock: FixedClock::default(),
            rt: test_runtime()?,
            seeded: Cell::new(0),
            _database: test_database,
        })
    }

    /// Runs `future` to completion on the board's runtime.
    pub fn run<F: Future>(&self, future: F) -> F::Output {
        self.rt.block_on(future)
    }

    pub fn seed_user(&self, email: &str) -> User {
        let user = User::new(
            "Test User",
            EmailAddress::new(email).expect("valid email"),
            PasswordHash::generate("password").expect("hash password"),
            Role::User,
            &self.clock,
        )
        .expect("valid user");
        self.run(self.users.store(&user)).expect("store user");
        user
    }

    pub fn seed_project(&self, owner: &User, name: &str) -> Project {
        let project = Project::new(
            ProjectName::new(name).expect("valid project name"),
            None,
            owner.id(),
            &self.clock,
        );
        self.run(self.projects.store(&project)).expect("store project");
        project
    }

    /// Stores a task in `status`. Each call is created one minute after the
    /// previous one so listings have a stable order.
    pub fn seed_task(
        &self,
        project: &Project,
        assignee: &User,
        status: TaskStatus,
        due: NaiveDate,
    ) -> Task {
        let offset = self.seeded.get();
        self.seeded.set(offset + 1);
        let created = self.clock.0 - TimeDelta::days(30) + TimeDelta::minutes(offset);
        let task = Task::from_persisted(PersistedTaskData {
            id: TaskId::new(),
            project_id: project.id(),
            assigned_to: assignee.id(),
            title: TaskTitle::new(format!("Task {offset}")).expect("valid title"),
            description: Some("Seeded for adapter tests".to_owned()),
            status,
            priority: TaskPriority::High,
            due_date: due,
            created_at: created,
            updated_at: created,
        });
        self.run(self.tasks.store(&task)).expect("store task");
        task
    }

    pub fn status_of(&self, task: &Task) -> Option<TaskStatus> {
        self.run(self.tasks.find_by_id(task.id()))
            .expect("lookup task")
            .map(|found| found.status())
    }
}

/// Provides repositories over a fresh database cloned from the template.
#[fixture]
pub fn board(postgres_cluster: PostgresCluster) -> Board {
    Board::new(postgres_cluster).expect("prepare test database")
}
