//! A running HANA Express container.

use db_container::query::query_param;
use db_container::{ConnectionParams, JdbcDatabaseImage, RunningDatabase};
use serde::Serialize;
use tracing::debug;

use crate::connection::{open_connection, run_init_script, HanaConnection};
use crate::error::Result;
use crate::image::HanaImage;

/// Query string parameter selecting the database (`SYSTEMDB` or a tenant).
pub const DATABASE_NAME_PARAM: &str = "databaseName";

/// A started HANA Express container.
///
/// Created by [`HanaImage::start`]. Dropping it removes the container;
/// [`HanaContainer::stop`] does so eagerly.
pub struct HanaContainer {
    inner: RunningDatabase<HanaImage>,
}

/// Connection details of a running container.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionInfo {
    pub container_id: String,
    pub host: String,
    pub jdbc_url: String,
    pub username: String,
    pub password: String,
    pub driver_class_name: String,
    pub test_query: String,
    /// Internal service port to published host port.
    pub ports: Vec<(u16, u16)>,
}

impl HanaContainer {
    pub(crate) fn new(inner: RunningDatabase<HanaImage>) -> Self {
        Self { inner }
    }

    pub fn id(&self) -> &str {
        self.inner.id()
    }

    pub fn image(&self) -> &HanaImage {
        self.inner.image()
    }

    /// Address the container's ports are published on.
    pub async fn host(&self) -> Result<String> {
        Ok(self.inner.host().await?)
    }

    pub async fn mapped_port(&self, internal_port: u16) -> Result<u16> {
        Ok(self.inner.mapped_port(internal_port).await?)
    }

    pub async fn jdbc_url(&self) -> Result<String> {
        Ok(self.inner.jdbc_url().await?)
    }

    /// JDBC URL with `query_string` (e.g. `?databaseName=HXE`) appended.
    pub async fn connection_url(&self, query_string: &str) -> Result<String> {
        Ok(self.inner.connection_url(query_string).await?)
    }

    pub fn username(&self) -> &str {
        self.image().username()
    }

    pub fn password(&self) -> &str {
        self.image().password()
    }

    pub fn driver_class_name(&self) -> &str {
        self.image().driver_class_name()
    }

    pub fn test_query_string(&self) -> &str {
        self.image().test_query_string()
    }

    /// Service ports that refuse a TCP connection.
    pub async fn unreachable_ports(&self) -> Result<Vec<u16>> {
        Ok(self.inner.unreachable_ports().await?)
    }

    pub async fn logs(&self) -> Result<String> {
        Ok(self.inner.logs().await?)
    }

    /// Opens a connection with the configured driver. `query_string` may
    /// select the database with `databaseName`.
    pub async fn create_connection(&self, query_string: &str) -> Result<HanaConnection> {
        let params = self.connection_params(query_string).await?;
        debug!(
            host = %params.host,
            port = params.port,
            database = ?params.database_name,
            "Opening HANA connection"
        );
        open_connection(self.image().driver(), &params).await
    }

    pub async fn connection_params(&self, query_string: &str) -> Result<ConnectionParams> {
        let image = self.image();
        Ok(ConnectionParams {
            host: self.host().await?,
            port: self.mapped_port(image.sql_port()).await?,
            user: image.username().to_string(),
            password: image.password().to_string(),
            database_name: query_param(query_string, DATABASE_NAME_PARAM),
        })
    }

    pub async fn connection_info(&self) -> Result<ConnectionInfo> {
        let image = self.image();
        let mut ports = Vec::with_capacity(image.service_ports().len());
        for &port in image.service_ports() {
            ports.push((port, self.mapped_port(port).await?));
        }

        Ok(ConnectionInfo {
            container_id: self.id().to_string(),
            host: self.host().await?,
            jdbc_url: self.jdbc_url().await?,
            username: image.username().to_string(),
            password: image.password().to_string(),
            driver_class_name: image.driver_class_name().to_string(),
            test_query: image.test_query_string().to_string(),
            ports,
        })
    }

    /// Runs the configured init script against the system database.
    pub(crate) async fn run_init_script(&self) -> Result<()> {
        if self.image().init_script().is_none() {
            return Ok(());
        }
        let params = self.connection_params("").await?;
        run_init_script(self.image(), &params).await?;
        Ok(())
    }

    /// Stops and removes the container
    pub async fn stop(self) -> Result<()> {
        Ok(self.inner.stop().await?)
    }
}
