//! Synchronous single-connection MySQL access layer.
//!
//! This crate sits directly atop the native [`mysql`] client and manages one
//! shared connection, executes parameterized statements, and materializes
//! result sets into generic [`RowValues`]-typed records. Parameters are
//! declared with a compact type-tag string (`i` integer, `s` string, `d`
//! double, `b` binary), one character per positional value.
//!
//! ```rust,no_run
//! use mysql_middleware::prelude::*;
//!
//! fn main() -> Result<(), MysqlMiddlewareError> {
//!     let config = MysqlConfig::new("localhost", "app", "secret", "inventory");
//!     let mut conn = MysqlConnection::connect(config)?;
//!
//!     let inserted = conn.execute_dml(
//!         "INSERT INTO t (id, name) VALUES (?, ?)",
//!         &ParamSpec::new("is", vec![RowValues::Int(5), RowValues::Text("Alice".into())]),
//!     )?;
//!     assert_eq!(inserted, 1);
//!
//!     let rows = conn.execute_select(
//!         "SELECT id, name FROM t WHERE id = ?",
//!         &ParamSpec::new("i", vec![RowValues::Int(5)]),
//!     )?;
//!     for row in &rows.results {
//!         println!("{:?} {:?}", row.get("id"), row.get("name"));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Every operation returns its own `Result`; nothing is accumulated on shared
//! error fields. The crate is synchronous by design: no pooling, no retry
//! policy, no async runtime.

pub mod config;
pub mod connection;
pub mod error;
pub mod executor;
pub mod params;
pub mod query;
pub mod results;
pub mod tls;
pub mod types;

mod transaction;

pub mod prelude;

pub use config::{CONNECT_TIMEOUT, DEFAULT_DB_NAME, DEFAULT_HOST, DEFAULT_PASSWORD, DEFAULT_USER, MysqlConfig};
pub use connection::{MysqlConnection, shared};
pub use error::MysqlMiddlewareError;
pub use executor::DatabaseExecutor;
pub use params::{ParamSpec, QueryAndParams, RECOGNIZED_TAGS};
pub use query::mysql_extract_value;
pub use results::{ResultRow, ResultSet};
pub use tls::TlsOptions;
pub use types::RowValues;
