//! Convenient imports for common functionality.
//!
//! Re-exports the types most callers need to connect and run queries.

pub use crate::config::MysqlConfig;
pub use crate::connection::{MysqlConnection, shared};
pub use crate::error::MysqlMiddlewareError;
pub use crate::executor::DatabaseExecutor;
pub use crate::params::{ParamSpec, QueryAndParams};
pub use crate::results::{ResultRow, ResultSet};
pub use crate::tls::TlsOptions;
pub use crate::types::RowValues;
