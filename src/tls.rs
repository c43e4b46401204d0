use std::path::PathBuf;

use mysql::{ClientIdentity, SslOpts};
use serde::{Deserialize, Serialize};

use crate::error::MysqlMiddlewareError;

/// Certificate material for an encrypted connection.
///
/// Three file paths, mirroring the classic server-key / client-certificate /
/// CA-bundle trio; no cipher-suite or protocol-version selection is exposed.
/// TLS failures are returned to the caller as
/// [`TlsConfig`](MysqlMiddlewareError::TlsConfig) or
/// [`TlsUnsupported`](MysqlMiddlewareError::TlsUnsupported) errors: the
/// connection cannot proceed unencrypted, but the hosting application decides
/// whether that is fatal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TlsOptions {
    /// Client private key (PEM)
    pub server_key: PathBuf,
    /// Client certificate chain (PEM)
    pub client_cert: PathBuf,
    /// CA bundle used to verify the server
    pub ca_cert: PathBuf,
}

impl TlsOptions {
    /// Bundle the three certificate paths.
    #[must_use]
    pub fn new(
        server_key: impl Into<PathBuf>,
        client_cert: impl Into<PathBuf>,
        ca_cert: impl Into<PathBuf>,
    ) -> Self {
        Self {
            server_key: server_key.into(),
            client_cert: client_cert.into(),
            ca_cert: ca_cert.into(),
        }
    }

    /// Validate the paths and build driver TLS options.
    ///
    /// # Errors
    ///
    /// Returns `MysqlMiddlewareError::TlsConfig` naming the first path that is
    /// missing or unreadable; no connection is attempted in that case.
    pub fn to_ssl_opts(&self) -> Result<SslOpts, MysqlMiddlewareError> {
        for (label, path) in [
            ("server key", &self.server_key),
            ("client certificate", &self.client_cert),
            ("CA bundle", &self.ca_cert),
        ] {
            if !path.is_file() {
                return Err(MysqlMiddlewareError::TlsConfig(format!(
                    "{label} not readable: {}",
                    path.display()
                )));
            }
        }

        let identity = ClientIdentity::new(self.client_cert.clone(), self.server_key.clone());
        Ok(SslOpts::default()
            .with_root_cert_path(Some(self.ca_cert.clone()))
            .with_client_identity(Some(identity)))
    }
}

/// Classify a connect-time driver error, distinguishing a refused TLS
/// handshake from ordinary connection failures.
pub(crate) fn classify_connect_error(err: mysql::Error) -> MysqlMiddlewareError {
    if let mysql::Error::DriverError(mysql::error::DriverError::TlsNotSupported) = err {
        return MysqlMiddlewareError::TlsUnsupported(
            "the server or active driver mode does not support the requested TLS handshake"
                .to_string(),
        );
    }
    MysqlMiddlewareError::ConnectionError(err.to_string())
}
