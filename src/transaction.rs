use mysql::prelude::Queryable;

use crate::error::MysqlMiddlewareError;

/// Toggle the session autocommit mode.
///
/// Disabling opens an explicit transaction region; the caller finishes it with
/// `COMMIT` or `ROLLBACK` through the same connection.
pub(crate) fn set_auto_commit(
    conn: &mut mysql::Conn,
    enabled: bool,
) -> Result<(), MysqlMiddlewareError> {
    let statement = if enabled {
        "SET autocommit = 1"
    } else {
        "SET autocommit = 0"
    };
    conn.query_drop(statement).map_err(|e| {
        MysqlMiddlewareError::ExecuteError(format!("failed to toggle autocommit: {e}"))
    })
}

/// Read the session autocommit mode from the server.
///
/// This is a round-trip (`SELECT @@autocommit`), not a cached flag, so it
/// reflects the authoritative server-side state.
pub(crate) fn is_auto_commit_enabled(
    conn: &mut mysql::Conn,
) -> Result<bool, MysqlMiddlewareError> {
    let value: Option<i64> = conn.query_first("SELECT @@autocommit").map_err(|e| {
        MysqlMiddlewareError::ExecuteError(format!("failed to query autocommit state: {e}"))
    })?;
    match value {
        Some(flag) => Ok(flag != 0),
        None => Err(MysqlMiddlewareError::ExecuteError(
            "SELECT @@autocommit returned no row".to_string(),
        )),
    }
}
