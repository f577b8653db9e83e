//! Environment preparation for the embedded cluster.

use super::BoxError;
use pg_embedded_setup_unpriv::{ExecutionPrivileges, detect_execution_privileges};
use std::ffi::OsString;
use std::net::TcpListener;

/// Variable naming the privileged worker binary used when tests run as root.
pub(super) const WORKER_VAR: &str = "PG_EMBEDDED_WORKER";

pub(super) fn env_vars_to_os(
    env_vars: &[(String, Option<String>)],
) -> Vec<(OsString, Option<OsString>)> {
    env_vars
        .iter()
        .map(|(key, value)| (OsString::from(key), value.as_ref().map(OsString::from)))
        .collect()
}

/// Variables to set while bootstrapping: a free port unless `PG_PORT` is
/// already chosen.
///
/// Running as root needs a worker binary that drops privileges; without
/// `PG_EMBEDDED_WORKER` the cluster cannot start.
pub(super) fn bootstrap_env_changes() -> Result<Vec<(OsString, Option<OsString>)>, BoxError> {
    if matches!(detect_execution_privileges(), ExecutionPrivileges::Root)
        && std::env::var_os(WORKER_VAR).is_none()
    {
        return Err(Box::new(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("running as root requires {WORKER_VAR} to name a pg_worker binary"),
        )));
    }

    let mut changes = Vec::new();
    if std::env::var_os("PG_PORT").is_none() {
        changes.push((OsString::from("PG_PORT"), Some(free_port()?)));
    }
    Ok(changes)
}

fn free_port() -> Result<OsString, BoxError> {
    let listener = TcpListener::bind(("127.0.0.1", 0)).map_err(|err| Box::new(err) as BoxError)?;
    let port = listener
        .local_addr()
        .map(|addr| addr.port())
        .map_err(|err| Box::new(err) as BoxError)?;
    drop(listener);
    Ok(OsString::from(port.to_string()))
}
