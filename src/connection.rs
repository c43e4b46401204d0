use std::sync::{Mutex, OnceLock};

use mysql::{Conn, OptsBuilder};

use crate::config::{AUTOCOMMIT_INIT, CONNECT_TIMEOUT, MysqlConfig};
use crate::error::MysqlMiddlewareError;
use crate::executor::{self, DatabaseExecutor};
use crate::params::ParamSpec;
use crate::results::ResultSet;
use crate::tls::classify_connect_error;
use crate::transaction;

/// The single live connection to a MySQL server.
///
/// Owns the underlying session exclusively: the type is not `Clone`, so the
/// session can never be duplicated and is closed exactly once, when the value
/// is dropped. All operations are synchronous and block the calling thread
/// until the server round-trip completes; wrap the connection in a `Mutex`
/// (or use [`shared`]) when calling from multiple threads.
pub struct MysqlConnection {
    conn: Conn,
}

impl std::fmt::Debug for MysqlConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MysqlConnection")
            .field("conn", &"<mysql::Conn>")
            .finish()
    }
}

impl MysqlConnection {
    /// Open a connection using the fully-specified `config`.
    ///
    /// The initialization sequence is fixed: the session init command
    /// `SET autocommit = 1`, a 5-second connect timeout, TLS material (when
    /// configured), then the real connect with empty config fields resolved
    /// to the crate defaults. The first failing step aborts the attempt.
    ///
    /// # Errors
    ///
    /// Returns `TlsConfig` for unreadable certificate paths (before any
    /// connection attempt), `TlsUnsupported` when the server or driver mode
    /// refuses the encryption handshake, and `ConnectionError` for everything
    /// else that keeps the session from opening.
    pub fn connect(config: MysqlConfig) -> Result<Self, MysqlMiddlewareError> {
        let ssl_opts = config.tls.as_ref().map(|tls| tls.to_ssl_opts()).transpose()?;

        let mut builder = OptsBuilder::new()
            .ip_or_hostname(Some(config.resolved_host().to_owned()))
            .user(Some(config.resolved_user().to_owned()))
            .pass(Some(config.resolved_password().to_owned()))
            .db_name(config.resolved_db_name().map(str::to_owned))
            .init(vec![AUTOCOMMIT_INIT])
            .tcp_connect_timeout(Some(CONNECT_TIMEOUT))
            .ssl_opts(ssl_opts);
        if let Some(port) = config.tcp_port {
            builder = builder.tcp_port(port);
        }

        let conn = Conn::new(builder).map_err(classify_connect_error)?;
        tracing::debug!(
            host = config.resolved_host(),
            db = config.resolved_db_name().unwrap_or(""),
            "mysql connection established"
        );
        Ok(Self { conn })
    }

    /// Toggle autocommit for this session. `false` begins an explicit
    /// multi-statement transaction region; the caller is responsible for a
    /// subsequent `COMMIT` or `ROLLBACK`.
    ///
    /// # Errors
    /// Returns `ExecuteError` if the server rejects the session change.
    pub fn set_auto_commit(&mut self, enabled: bool) -> Result<(), MysqlMiddlewareError> {
        transaction::set_auto_commit(&mut self.conn, enabled)
    }

    /// Query the server for the session's current autocommit state.
    ///
    /// # Errors
    /// Returns `ExecuteError` if the round-trip fails.
    pub fn is_auto_commit_enabled(&mut self) -> Result<bool, MysqlMiddlewareError> {
        transaction::is_auto_commit_enabled(&mut self.conn)
    }

    /// Consume the connection and close the underlying session.
    ///
    /// Dropping has the same effect; taking `self` by value makes a second
    /// close unrepresentable.
    pub fn disconnect(self) {
        tracing::debug!("mysql connection closed");
    }
}

impl DatabaseExecutor for MysqlConnection {
    fn execute_dml(
        &mut self,
        query: &str,
        params: &ParamSpec,
    ) -> Result<usize, MysqlMiddlewareError> {
        executor::execute_dml(&mut self.conn, query, params)
    }

    fn execute_select(
        &mut self,
        query: &str,
        params: &ParamSpec,
    ) -> Result<ResultSet, MysqlMiddlewareError> {
        executor::execute_select(&mut self.conn, query, params)
    }
}

static SHARED: OnceLock<Mutex<MysqlConnection>> = OnceLock::new();

/// Process-wide shared connection, created on the first call.
///
/// First caller wins: `config` is only consulted while no shared connection
/// exists; later calls return the existing instance and ignore their argument.
/// The `Mutex` provides the mutual exclusion the synchronous connection needs
/// under concurrent callers.
///
/// # Errors
///
/// Propagates [`MysqlConnection::connect`] errors from the initializing call.
/// If two threads race on first use, both may connect; the loser's session is
/// dropped (and thereby closed) and every caller observes the same instance
/// afterwards.
pub fn shared(
    config: &MysqlConfig,
) -> Result<&'static Mutex<MysqlConnection>, MysqlMiddlewareError> {
    if let Some(existing) = SHARED.get() {
        return Ok(existing);
    }
    let connection = MysqlConnection::connect(config.clone())?;
    Ok(SHARED.get_or_init(|| Mutex::new(connection)))
}
