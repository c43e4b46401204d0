use thiserror::Error;

/// Error type shared by every fallible operation in this crate.
///
/// Each pipeline stage maps its failures onto a dedicated variant, so callers
/// can match on what went wrong instead of parsing message text. Every call
/// returns its own `Result`; no error state is accumulated between calls.
#[derive(Debug, Error)]
pub enum MysqlMiddlewareError {
    #[error(transparent)]
    DriverError(#[from] mysql::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Statement preparation error: {0}")]
    PrepareError(String),

    #[error("Parameter binding error: {0}")]
    BindError(String),

    #[error("SQL execution error: {0}")]
    ExecuteError(String),

    #[error("Result metadata error: {0}")]
    MetadataError(String),

    #[error("TLS unsupported: {0}")]
    TlsUnsupported(String),

    #[error("TLS configuration error: {0}")]
    TlsConfig(String),
}
