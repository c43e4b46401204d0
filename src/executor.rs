use std::sync::Arc;

use mysql::prelude::Queryable;
use mysql::Statement;

use crate::error::MysqlMiddlewareError;
use crate::params::ParamSpec;
use crate::query::{build_result_set, extract_column_names};
use crate::results::ResultSet;

/// Parameterized statement execution against a live connection.
///
/// Both operations share one pipeline: prepare, bind, execute, postprocess,
/// close. The prepared-statement handle is released on every exit path.
pub trait DatabaseExecutor {
    /// Execute a single DML statement (INSERT, UPDATE, DELETE) and return the
    /// number of rows affected.
    ///
    /// # Errors
    /// Returns `PrepareError`, `BindError`, or `ExecuteError` depending on the
    /// stage that failed; the statement handle is closed either way.
    fn execute_dml(
        &mut self,
        query: &str,
        params: &ParamSpec,
    ) -> Result<usize, MysqlMiddlewareError>;

    /// Execute a single SELECT statement and materialize the result set.
    ///
    /// # Errors
    /// Returns `PrepareError`, `MetadataError` (statement produced no
    /// result-set descriptor), `BindError`, or `ExecuteError`; the statement
    /// handle is closed either way.
    fn execute_select(
        &mut self,
        query: &str,
        params: &ParamSpec,
    ) -> Result<ResultSet, MysqlMiddlewareError>;
}

pub(crate) fn execute_dml(
    conn: &mut mysql::Conn,
    query: &str,
    params: &ParamSpec,
) -> Result<usize, MysqlMiddlewareError> {
    let stmt = prepare(conn, query)?;
    let outcome = dml_with_statement(conn, &stmt, params);
    let closed = close(conn, stmt);
    let affected = outcome?;
    closed?;
    tracing::debug!(query, affected, "dml executed");
    Ok(affected)
}

pub(crate) fn execute_select(
    conn: &mut mysql::Conn,
    query: &str,
    params: &ParamSpec,
) -> Result<ResultSet, MysqlMiddlewareError> {
    let stmt = prepare(conn, query)?;
    let outcome = select_with_statement(conn, &stmt, params);
    let closed = close(conn, stmt);
    let result_set = outcome?;
    closed?;
    tracing::debug!(query, rows = result_set.results.len(), "select executed");
    Ok(result_set)
}

fn prepare(conn: &mut mysql::Conn, query: &str) -> Result<Statement, MysqlMiddlewareError> {
    conn.prep(query).map_err(|e| {
        MysqlMiddlewareError::PrepareError(format!("failed to prepare `{query}`: {e}"))
    })
}

fn close(conn: &mut mysql::Conn, stmt: Statement) -> Result<(), MysqlMiddlewareError> {
    conn.close(stmt).map_err(|e| {
        MysqlMiddlewareError::ExecuteError(format!("failed to close statement: {e}"))
    })
}

// The statement must declare as many placeholders as the spec carries values;
// checked up front so a mismatch never reaches the server.
fn check_arity(stmt: &Statement, params: &ParamSpec) -> Result<(), MysqlMiddlewareError> {
    let expected = usize::from(stmt.num_params());
    if expected != params.len() {
        return Err(MysqlMiddlewareError::BindError(format!(
            "statement expects {expected} parameter(s) but the spec supplies {}",
            params.len()
        )));
    }
    Ok(())
}

fn dml_with_statement(
    conn: &mut mysql::Conn,
    stmt: &Statement,
    params: &ParamSpec,
) -> Result<usize, MysqlMiddlewareError> {
    check_arity(stmt, params)?;
    let bound = params.to_mysql_params()?;
    let result = conn.exec_iter(stmt, bound).map_err(|e| {
        MysqlMiddlewareError::ExecuteError(format!("statement execution failed: {e}"))
    })?;
    let affected = result.affected_rows();
    drop(result);
    usize::try_from(affected).map_err(|e| {
        MysqlMiddlewareError::ExecuteError(format!("affected rows conversion error: {e}"))
    })
}

fn select_with_statement(
    conn: &mut mysql::Conn,
    stmt: &Statement,
    params: &ParamSpec,
) -> Result<ResultSet, MysqlMiddlewareError> {
    // Metadata-driven column discovery happens before any row is fetched.
    if stmt.num_columns() == 0 {
        return Err(MysqlMiddlewareError::MetadataError(
            "statement produced no result-set metadata (not a SELECT?)".to_string(),
        ));
    }
    check_arity(stmt, params)?;
    let column_names = Arc::new(extract_column_names(stmt.columns()));
    let bound = params.to_mysql_params()?;
    let mut result = conn.exec_iter(stmt, bound).map_err(|e| {
        MysqlMiddlewareError::ExecuteError(format!("statement execution failed: {e}"))
    })?;
    build_result_set(column_names, &mut result)
}
