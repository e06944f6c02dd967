//! Database-agnostic building blocks for JDBC-style test containers.
//!
//! The container lifecycle itself (pulling, port mapping, waiting for
//! readiness, removal) is owned by `testcontainers`. This crate adds the
//! pieces every relational database container shares on top of it.
//!
//! # Structure
//!
//! - `image_name`: Docker image reference parsing (`repository[:tag]`)
//! - `database`: `JdbcDatabaseImage`, the trait a database image implements
//! - `driver`: `SqlDriver` and `SqlConnection`, the pluggable driver seam
//! - `provider`: `DatabaseContainerProvider`, the database-type factory
//! - `running`: `RunningDatabase`, a started container plus its configuration
//! - `script`: splitting SQL init scripts into statements
//! - `license`: license acceptance file lookup
//! - `query`: JDBC URL query string helpers

pub mod database;
pub mod driver;
pub mod error;
pub mod image_name;
pub mod license;
pub mod provider;
pub mod query;
pub mod running;
pub mod script;

pub use database::JdbcDatabaseImage;
pub use driver::{ConnectionParams, DriverError, SqlConnection, SqlDriver};
pub use error::{Error, ImageNameError, Result};
pub use image_name::DockerImageName;
pub use provider::DatabaseContainerProvider;
pub use running::RunningDatabase;
pub use script::split_statements;
