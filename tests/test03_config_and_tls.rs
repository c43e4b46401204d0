use std::io::Write;

use mysql_middleware::prelude::*;
use mysql_middleware::{DEFAULT_HOST, DEFAULT_USER, MysqlMiddlewareError};

#[test]
fn empty_fields_fall_back_to_defaults() {
    let config = MysqlConfig::default();
    assert_eq!(config.resolved_host(), DEFAULT_HOST);
    assert_eq!(config.resolved_user(), DEFAULT_USER);
    assert_eq!(config.resolved_password(), "");
    // Empty database name means "no database selected".
    assert_eq!(config.resolved_db_name(), None);
}

#[test]
fn explicit_fields_are_kept() {
    let config = MysqlConfig::new("db.example.com", "app", "secret", "inventory")
        .with_tcp_port(3307);
    assert_eq!(config.resolved_host(), "db.example.com");
    assert_eq!(config.resolved_user(), "app");
    assert_eq!(config.resolved_password(), "secret");
    assert_eq!(config.resolved_db_name(), Some("inventory"));
    assert_eq!(config.tcp_port, Some(3307));
}

#[test]
fn config_round_trips_through_serde() -> Result<(), Box<dyn std::error::Error>> {
    let config = MysqlConfig::new("h", "u", "p", "d")
        .with_tls(TlsOptions::new("/k.pem", "/c.pem", "/ca.pem"));
    let encoded = serde_json::to_string(&config)?;
    let decoded: MysqlConfig = serde_json::from_str(&encoded)?;
    assert_eq!(decoded, config);
    Ok(())
}

#[test]
fn unreadable_certificate_path_is_a_tls_config_error() {
    let tls = TlsOptions::new(
        "/nonexistent/server.key",
        "/nonexistent/domain.crt",
        "/nonexistent/cabundle.crt",
    );
    let err = tls.to_ssl_opts().unwrap_err();
    assert!(matches!(err, MysqlMiddlewareError::TlsConfig(_)));
    assert!(err.to_string().contains("/nonexistent/server.key"));
}

#[test]
fn readable_certificate_paths_build_ssl_opts() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let mut paths = Vec::new();
    for name in ["server.key", "domain.crt", "cabundle.crt"] {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path)?;
        writeln!(file, "-----BEGIN PLACEHOLDER-----")?;
        paths.push(path);
    }

    let tls = TlsOptions::new(&paths[0], &paths[1], &paths[2]);
    assert!(tls.to_ssl_opts().is_ok());
    Ok(())
}

#[test]
fn connecting_with_bad_tls_paths_never_reaches_the_network() {
    // The path check runs before any socket is opened, so this fails fast
    // with TlsConfig even though no server exists at the configured host.
    let config = MysqlConfig::new("host.invalid", "u", "p", "d").with_tls(TlsOptions::new(
        "/nonexistent/server.key",
        "/nonexistent/domain.crt",
        "/nonexistent/cabundle.crt",
    ));
    let err = MysqlConnection::connect(config).unwrap_err();
    assert!(matches!(err, MysqlMiddlewareError::TlsConfig(_)));
}

#[test]
fn error_messages_name_their_concern() {
    assert!(
        MysqlMiddlewareError::BindError("x".into())
            .to_string()
            .starts_with("Parameter binding error:")
    );
    assert!(
        MysqlMiddlewareError::MetadataError("x".into())
            .to_string()
            .starts_with("Result metadata error:")
    );
    assert!(
        MysqlMiddlewareError::TlsUnsupported("x".into())
            .to_string()
            .starts_with("TLS unsupported:")
    );
    assert!(
        MysqlMiddlewareError::ConnectionError("x".into())
            .to_string()
            .starts_with("Connection error:")
    );
}
