//! SAP HANA Express Edition test containers.
//!
//! Starts the `store/saplabs/hanaexpress` image through `testcontainers` and
//! exposes JDBC-style connection details for it.
//!
//! # Example
//!
//! ```rust,ignore
//! use hana_container::HanaImage;
//!
//! let container = HanaImage::default()
//!     .with_password("RandomPassword1")?
//!     .accept_license()
//!     .start()
//!     .await?;
//!
//! let url = container.connection_url("?databaseName=HXE").await?;
//! assert!(container.unreachable_ports().await?.is_empty());
//! container.stop().await?;
//! ```
//!
//! # Drivers
//!
//! No SQL driver is linked in. Implement [`SqlDriver`] for a HANA client and
//! pass it to [`HanaImage::with_driver`] to enable
//! [`HanaContainer::create_connection`] and init scripts; otherwise those
//! fail with [`HanaError::NoDriverFound`].

pub mod config;
pub mod connection;
pub mod container;
pub mod error;
pub mod image;
pub mod password;
pub mod provider;

pub use config::HanaConfig;
pub use connection::HanaConnection;
pub use container::{ConnectionInfo, HanaContainer};
pub use error::{HanaError, Result};
pub use image::HanaImage;
pub use password::validate_password;
pub use provider::HanaContainerProvider;

pub use db_container::{
    ConnectionParams, DatabaseContainerProvider, DockerImageName, DriverError,
    JdbcDatabaseImage, SqlConnection, SqlDriver,
};
