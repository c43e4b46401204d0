use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::tls::TlsOptions;

/// Fallback host used when the configured host is empty.
pub const DEFAULT_HOST: &str = "localhost";
/// Fallback user used when the configured user is empty.
pub const DEFAULT_USER: &str = "root";
/// Fallback password used when the configured password is empty.
pub const DEFAULT_PASSWORD: &str = "";
/// Fallback database name; empty means no database is selected at connect time.
pub const DEFAULT_DB_NAME: &str = "";

/// Connect timeout applied to every connection attempt. Fixed, not per-call.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Session init command sent before the connection is handed to the caller.
pub(crate) const AUTOCOMMIT_INIT: &str = "SET autocommit = 1";

/// Connection settings for [`MysqlConnection::connect`](crate::MysqlConnection::connect).
///
/// Empty string fields fall back to the crate-wide default constants when the
/// connection is opened; the struct itself is never mutated. Derives `serde`
/// traits so callers can load it from whatever format they keep settings in.
///
/// ```rust
/// use mysql_middleware::MysqlConfig;
///
/// let config = MysqlConfig::new("db.example.com", "app", "secret", "inventory");
/// assert_eq!(config.resolved_host(), "db.example.com");
///
/// let defaults = MysqlConfig::default();
/// assert_eq!(defaults.resolved_host(), "localhost");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MysqlConfig {
    /// Database server host
    pub host: String,
    /// Account user name
    pub user: String,
    /// Account password
    pub password: String,
    /// Database (schema) to select; empty selects none
    pub db_name: String,
    /// TCP port override; the driver default (3306) applies when unset
    #[serde(default)]
    pub tcp_port: Option<u16>,
    /// Transport encryption settings; plaintext when unset
    #[serde(default)]
    pub tls: Option<TlsOptions>,
}

impl MysqlConfig {
    /// Create a config from the four connection fields.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        db_name: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            password: password.into(),
            db_name: db_name.into(),
            tcp_port: None,
            tls: None,
        }
    }

    /// Enable transport encryption. Must be configured before connecting;
    /// carrying the paths on the config guarantees that ordering.
    #[must_use]
    pub fn with_tls(mut self, tls: TlsOptions) -> Self {
        self.tls = Some(tls);
        self
    }

    /// Override the TCP port.
    #[must_use]
    pub fn with_tcp_port(mut self, port: u16) -> Self {
        self.tcp_port = Some(port);
        self
    }

    /// Host after empty-field fallback.
    #[must_use]
    pub fn resolved_host(&self) -> &str {
        resolve(&self.host, DEFAULT_HOST)
    }

    /// User after empty-field fallback.
    #[must_use]
    pub fn resolved_user(&self) -> &str {
        resolve(&self.user, DEFAULT_USER)
    }

    /// Password after empty-field fallback.
    #[must_use]
    pub fn resolved_password(&self) -> &str {
        resolve(&self.password, DEFAULT_PASSWORD)
    }

    /// Database name after empty-field fallback, or None when empty.
    #[must_use]
    pub fn resolved_db_name(&self) -> Option<&str> {
        let name = resolve(&self.db_name, DEFAULT_DB_NAME);
        if name.is_empty() { None } else { Some(name) }
    }
}

fn resolve<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}
