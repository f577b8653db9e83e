//! Server configuration read from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `TASKBOARD_BIND_ADDR` | `127.0.0.1:8000` |
//! | `DATABASE_URL` | unset: in-memory storage |
//! | `TASKBOARD_DB_POOL_SIZE` | `8` |
//! | `TASKBOARD_PROGRESSION` | `permissive` |
//! | `TASKBOARD_OVERDUE_SWEEP_SECS` | unset: no background sweep |
//! | `TASKBOARD_SESSION_TTL_SECS` | `86400` |
//! | `TASKBOARD_SEED_USERS` | `true` |
//! | `TASKBOARD_LOG_FORMAT` | `plain` |

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use crate::task::domain::Progression;

/// Bind address variable.
pub const BIND_ADDR_VAR: &str = "TASKBOARD_BIND_ADDR";
/// Database connection string variable.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
/// Connection pool size variable.
pub const POOL_SIZE_VAR: &str = "TASKBOARD_DB_POOL_SIZE";
/// Status progression mode variable.
pub const PROGRESSION_VAR: &str = "TASKBOARD_PROGRESSION";
/// Background sweep interval variable, in seconds.
pub const SWEEP_SECS_VAR: &str = "TASKBOARD_OVERDUE_SWEEP_SECS";
/// Session token lifetime variable, in seconds.
pub const SESSION_TTL_SECS_VAR: &str = "TASKBOARD_SESSION_TTL_SECS";
/// Default-account seeding toggle variable.
pub const SEED_USERS_VAR: &str = "TASKBOARD_SEED_USERS";
/// Log output format variable.
pub const LOG_FORMAT_VAR: &str = "TASKBOARD_LOG_FORMAT";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_POOL_SIZE: u32 = 8;
const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Plain,
    /// One JSON object per line.
    Json,
}

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable holds a value that cannot be parsed.
    #[error("invalid value '{value}' for {name}: {reason}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
        /// What was expected.
        reason: &'static str,
    },
}

impl ConfigError {
    const fn invalid(name: &'static str, value: String, reason: &'static str) -> Self {
        Self::Invalid {
            name,
            value,
            reason,
        }
    }
}

/// Typed server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Socket address the HTTP server listens on.
    pub bind_addr: SocketAddr,
    /// PostgreSQL connection string; in-memory storage when `None`.
    pub database_url: Option<String>,
    /// Maximum PostgreSQL connections.
    pub pool_size: u32,
    /// How strictly status changes are checked.
    pub progression: Progression,
    /// Interval of the background overdue sweep, if enabled.
    pub overdue_sweep_interval: Option<Duration>,
    /// How long a login token stays valid.
    pub session_ttl: Duration,
    /// Whether to create the default admin and user accounts on start.
    pub seed_users: bool,
    /// Log output format.
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which returns a variable's value
    /// or `None` when it is unset.
    ///
    /// Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unparsable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let raw_bind_addr = read(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = raw_bind_addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| {
                ConfigError::invalid(BIND_ADDR_VAR, raw_bind_addr.clone(), "expected host:port")
            })?;

        let pool_size = match read(POOL_SIZE_VAR) {
            None => DEFAULT_POOL_SIZE,
            Some(raw) => parse_positive(POOL_SIZE_VAR, raw)?,
        };

        let progression = match read(PROGRESSION_VAR) {
            None => Progression::default(),
            Some(raw) => Progression::try_from(raw.as_str()).map_err(|_| {
                ConfigError::invalid(PROGRESSION_VAR, raw, "expected permissive or forward_only")
            })?,
        };

        let overdue_sweep_interval = read(SWEEP_SECS_VAR)
            .map(|raw| parse_positive::<u64>(SWEEP_SECS_VAR, raw).map(Duration::from_secs))
            .transpose()?;

        let session_ttl = Duration::from_secs(match read(SESSION_TTL_SECS_VAR) {
            None => DEFAULT_SESSION_TTL_SECS,
            Some(raw) => parse_positive(SESSION_TTL_SECS_VAR, raw)?,
        });

        let seed_users = match read(SEED_USERS_VAR) {
            None => true,
            Some(raw) => parse_bool(SEED_USERS_VAR, raw)?,
        };

        let log_format = match read(LOG_FORMAT_VAR) {
            None => LogFormat::default(),
            Some(raw) => parse_log_format(raw)?,
        };

        Ok(Self {
            bind_addr,
            database_url: read(DATABASE_URL_VAR),
            pool_size,
            progression,
            overdue_sweep_interval,
            session_ttl,
            seed_users,
            log_format,
        })
    }
}

fn parse_positive<T>(name: &'static str, raw: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => Ok(value),
        _ => Err(ConfigError::invalid(name, raw, "expected a positive integer")),
    }
}

fn parse_bool(name: &'static str, raw: String) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(name, raw, "expected true or false")),
    }
}

fn parse_log_format(raw: String) -> Result<LogFormat, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "plain" | "text" => Ok(LogFormat::Plain),
        "json" => Ok(LogFormat::Json),
        _ => Err(ConfigError::invalid(LOG_FORMAT_VAR, raw, "expected plain or json")),
    }
}
