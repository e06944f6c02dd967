//! The contract a relational database image fulfils.

use std::path::Path;

use testcontainers::Image;

/// A `testcontainers` image that serves a relational database reachable
/// through a JDBC-style URL.
///
/// Implementors describe the connection parameters; the lifecycle stays with
/// the container runtime.
pub trait JdbcDatabaseImage: Image + Clone {
    /// Fully qualified name of the JDBC driver for this database.
    fn driver_class_name(&self) -> &str;

    fn username(&self) -> &str;

    fn password(&self) -> &str;

    /// A query that succeeds on any healthy server and yields a single row
    /// containing `1`.
    fn test_query_string(&self) -> &str;

    /// Internal port the SQL endpoint listens on.
    fn sql_port(&self) -> u16;

    /// Every internal service port the image is expected to open.
    fn service_ports(&self) -> &[u16];

    /// Builds the JDBC URL for a server reachable at `host:port`.
    fn jdbc_url(&self, host: &str, port: u16) -> String;

    /// SQL script to run once the server is ready.
    fn init_script(&self) -> Option<&Path> {
        None
    }
}
