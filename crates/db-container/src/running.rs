//! A started database container.

use std::time::Duration;

use testcontainers::core::ContainerPort;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ContainerRequest};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use crate::database::JdbcDatabaseImage;
use crate::error::{Error, Result};
use crate::query::append_query;

const PORT_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// A running container together with the configuration it was started from.
///
/// The container is removed by the runtime when this value is dropped;
/// [`RunningDatabase::stop`] does the same eagerly and reports failures.
pub struct RunningDatabase<I: JdbcDatabaseImage> {
    container: ContainerAsync<I>,
    image: I,
}

impl<I: JdbcDatabaseImage> RunningDatabase<I> {
    /// Starts the requested container and waits for its ready conditions.
    pub async fn start(request: ContainerRequest<I>) -> Result<Self> {
        let image = request.image().clone();
        let container = request.start().await?;
        info!(id = container.id(), "Started container");
        Ok(Self { container, image })
    }

    pub fn id(&self) -> &str {
        self.container.id()
    }

    /// Configuration the container was started with.
    pub fn image(&self) -> &I {
        &self.image
    }

    /// Host (address) the container's ports are published on.
    pub async fn host(&self) -> Result<String> {
        Ok(self.container.get_host().await?.to_string())
    }

    /// Host port that `internal_port` is published on.
    pub async fn mapped_port(&self, internal_port: u16) -> Result<u16> {
        if !self.image.service_ports().contains(&internal_port) {
            return Err(Error::UndeclaredPort(internal_port));
        }
        Ok(self
            .container
            .get_host_port_ipv4(ContainerPort::Tcp(internal_port))
            .await?)
    }

    /// JDBC URL pointing at the published SQL port.
    pub async fn jdbc_url(&self) -> Result<String> {
        let host = self.host().await?;
        let port = self.mapped_port(self.image.sql_port()).await?;
        Ok(self.image.jdbc_url(&host, port))
    }

    /// JDBC URL with `query_string` appended unchanged.
    pub async fn connection_url(&self, query_string: &str) -> Result<String> {
        Ok(append_query(&self.jdbc_url().await?, query_string))
    }

    /// Declared service ports that do not accept a TCP connection on their
    /// published host port.
    pub async fn unreachable_ports(&self) -> Result<Vec<u16>> {
        let host = self.host().await?;
        let mut unreachable = Vec::new();

        for &port in self.image.service_ports() {
            let mapped = self.mapped_port(port).await?;
            match tokio::time::timeout(PORT_CHECK_TIMEOUT, TcpStream::connect((host.as_str(), mapped)))
                .await
            {
                Ok(Ok(_)) => debug!(port, mapped, "Port is reachable"),
                Ok(Err(e)) => {
                    debug!(port, mapped, "Port is not reachable: {}", e);
                    unreachable.push(port);
                }
                Err(_) => {
                    debug!(port, mapped, "Port check timed out");
                    unreachable.push(port);
                }
            }
        }

        Ok(unreachable)
    }

    /// Gets stdout and stderr of the container
    pub async fn logs(&self) -> Result<String> {
        let stdout = self.container.stdout_to_vec().await?;
        let stderr = self.container.stderr_to_vec().await?;

        Ok(format!(
            "STDOUT:\n{}\n\nSTDERR:\n{}",
            String::from_utf8_lossy(&stdout),
            String::from_utf8_lossy(&stderr)
        ))
    }

    /// Stops and removes the container
    pub async fn stop(self) -> Result<()> {
        let id = self.container.id().to_string();
        info!("Stopping container: {}", id);

        if let Err(e) = self.container.stop().await {
            warn!("Failed to stop container {}: {}", id, e);
        }
        self.container.rm().await?;

        info!("Container stopped and removed");
        Ok(())
    }
}
