//! Pluggable SQL drivers.
//!
//! Containers never link a database driver themselves. A caller hands one in
//! and the container uses it for init scripts and
//! `create_connection`-style helpers.

use std::fmt;

use async_trait::async_trait;

/// Error type drivers report; surfaced to callers as text.
pub type DriverError = Box<dyn std::error::Error + Send + Sync>;

/// Everything needed to open a connection to a running container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Database to select on connect, if the server hosts several.
    pub database_name: Option<String>,
}

/// Opens connections for one database product.
#[async_trait]
pub trait SqlDriver: fmt::Debug + Send + Sync {
    /// JDBC driver class this driver is compatible with,
    /// e.g. `com.sap.db.jdbc.Driver`.
    fn class_name(&self) -> &str;

    async fn connect(&self, params: &ConnectionParams) -> Result<Box<dyn SqlConnection>, DriverError>;
}

/// An open connection.
#[async_trait]
pub trait SqlConnection: Send + Sync {
    /// Executes a statement that returns no rows.
    async fn execute(&self, sql: &str) -> Result<(), DriverError>;

    /// Runs a query returning a single integer value.
    async fn query_i32(&self, sql: &str) -> Result<i32, DriverError>;

    /// Runs a query returning a single string value.
    async fn query_string(&self, sql: &str) -> Result<String, DriverError>;
}
