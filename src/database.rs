//! `PostgreSQL` connection pooling shared by the Diesel adapters.

use diesel::PgConnection;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// `PostgreSQL` connection pool type.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// SQL creating the `users`, `projects`, and `tasks` tables.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../migrations/2026-10-19-000000_create_taskboard_tables/up.sql");

/// Errors raised while preparing the database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// No pooled connection could be obtained.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
    /// A schema statement failed.
    #[error("schema setup failed: {0}")]
    Schema(#[from] diesel::result::Error),
}

/// Builds a connection pool for `database_url` holding at most `max_size`
/// connections.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial connections cannot be established.
pub fn connect(database_url: &str, max_size: u32) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().max_size(max_size).build(manager)
}

/// Creates any missing tables. Safe to run on every start.
///
/// This is a blocking operation that should be called from `spawn_blocking`
/// or a synchronous context.
///
/// # Errors
///
/// Returns [`DatabaseError`] when no connection is available or a statement
/// fails.
pub fn apply_schema(pool: &PgPool) -> Result<(), DatabaseError> {
    let mut conn = pool.get()?;
    conn.batch_execute(CREATE_SCHEMA_SQL)?;
    Ok(())
}
