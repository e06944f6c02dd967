//! Integration tests against a real HANA Express container.
//!
//! These need Docker, access to `store/saplabs/hanaexpress` and several
//! minutes per container, so they are ignored by default:
//!
//! ```bash
//! cargo test --test hana_container -- --ignored
//! ```

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use hana_container::{
    ConnectionParams, DockerImageName, DriverError, HanaContainer, HanaError, HanaImage,
    SqlConnection, SqlDriver,
};
use tokio::net::TcpStream;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const IMAGE: &str = "store/saplabs/hanaexpress:2.00.045.00.20200121.1";
const OLDER_IMAGE: &str = "store/saplabs/hanaexpress:2.00.040.00.20190729.1";

/// Initialize logging for tests
fn init_logging() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

fn image() -> HanaImage {
    HanaImage::new(DockerImageName::parse(IMAGE).unwrap()).accept_license()
}

/// Driver registered under the HANA class name. It does not speak the HANA
/// protocol: `connect` only opens a TCP connection to the SQL port, and
/// every call is recorded for assertions.
#[derive(Debug, Default)]
struct TcpCheckDriver {
    connections: Arc<Mutex<Vec<ConnectionParams>>>,
    executed: Arc<Mutex<Vec<String>>>,
}

struct TcpCheckConnection {
    _stream: TcpStream,
    executed: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl SqlDriver for TcpCheckDriver {
    fn class_name(&self) -> &str {
        "com.sap.db.jdbc.Driver"
    }

    async fn connect(
        &self,
        params: &ConnectionParams,
    ) -> std::result::Result<Box<dyn SqlConnection>, DriverError> {
        let stream = TcpStream::connect((params.host.as_str(), params.port)).await?;
        self.connections.lock().unwrap().push(params.clone());
        Ok(Box::new(TcpCheckConnection {
            _stream: stream,
            executed: Arc::clone(&self.executed),
        }))
    }
}

#[async_trait]
impl SqlConnection for TcpCheckConnection {
    async fn execute(&self, sql: &str) -> std::result::Result<(), DriverError> {
        self.executed.lock().unwrap().push(sql.to_string());
        Ok(())
    }

    async fn query_i32(&self, sql: &str) -> std::result::Result<i32, DriverError> {
        if sql == "SELECT 1 FROM SYS.DUMMY" {
            Ok(1)
        } else {
            Err(format!("unsupported query: {sql}").into())
        }
    }

    async fn query_string(&self, sql: &str) -> std::result::Result<String, DriverError> {
        Err(format!("unsupported query: {sql}").into())
    }
}

fn init_script() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/init_hana.sql")
}

async fn assert_test_query_on(database: &str) -> Result<()> {
    let driver = Arc::new(TcpCheckDriver::default());
    let connections = Arc::clone(&driver.connections);
    let container = image().with_driver(driver).start().await?;

    let connection = container
        .create_connection(&format!("?databaseName={database}"))
        .await?;
    let result = connection
        .query_i32(container.test_query_string())
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    assert_eq!(result, 1);

    let params = connections.lock().unwrap().clone();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].database_name.as_deref(), Some(database));
    assert_eq!(params[0].port, container.mapped_port(39017).await?);
    assert_eq!(params[0].user, "SYSTEM");

    container.stop().await?;
    Ok(())
}

async fn assert_hana_ports_available(container: &HanaContainer) -> Result<()> {
    let unreachable = container.unreachable_ports().await?;
    assert!(
        unreachable.is_empty(),
        "The required ports {unreachable:?} are not available!"
    );
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker and the HANA Express image"]
async fn test_container_starts_and_hana_ports_are_available() -> Result<()> {
    init_logging();

    let container = image().start().await?;
    assert_hana_ports_available(&container).await?;
    container.stop().await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker and the HANA Express image"]
async fn test_driver_class_name() -> Result<()> {
    init_logging();

    let container = image().start().await?;
    assert_eq!(container.driver_class_name(), "com.sap.db.jdbc.Driver");
    container.stop().await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker and the HANA Express image"]
async fn test_accept_license_programmatically() -> Result<()> {
    init_logging();

    let container = HanaImage::new(DockerImageName::parse(OLDER_IMAGE)?)
        .accept_license()
        .start()
        .await?;
    assert_hana_ports_available(&container).await?;
    container.stop().await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker and the HANA Express image"]
async fn test_connection_url_appends_database_name() -> Result<()> {
    init_logging();

    let container = image().start().await?;
    let jdbc_url = container.jdbc_url().await?;
    let port = container.mapped_port(39017).await?;

    assert!(jdbc_url.starts_with("jdbc:sap://"));
    assert!(jdbc_url.ends_with(&format!(":{port}/")));
    assert_eq!(
        container.connection_url("?databaseName=HXE").await?,
        format!("{jdbc_url}?databaseName=HXE")
    );
    container.stop().await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker and the HANA Express image"]
async fn test_custom_password() -> Result<()> {
    init_logging();

    let container = image().with_password("RandomPassword1")?.start().await?;
    assert_eq!(container.password(), "RandomPassword1");
    container.stop().await?;
    Ok(())
}

#[tokio::test]
async fn test_invalid_password_fails_before_start() {
    init_logging();

    let err = image().with_password("nocapitalshere").err().unwrap();
    assert!(matches!(err, HanaError::InvalidPassword));
    assert_eq!(
        err.to_string(),
        "Password must contain characters from the following three categories:\n - Latin uppercase letters (A through Z)\n - Latin lowercase letters (a through z)\n - Base 10 digits (0 through 9).\n"
    );
}

#[tokio::test]
#[ignore = "requires Docker and the HANA Express image"]
async fn test_connection_without_driver_fails() -> Result<()> {
    init_logging();

    let container = image().start().await?;
    let err = container.create_connection("?databaseName=HXE").await.err().unwrap();
    info!("Connection attempt failed as expected: {}", err);
    assert!(matches!(err, HanaError::NoDriverFound { .. }));
    container.stop().await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker and the HANA Express image"]
async fn test_init_script_without_driver_fails_start() -> Result<()> {
    init_logging();

    let err = image().with_init_script(init_script()).start().await.err().unwrap();
    assert!(matches!(err, HanaError::NoDriverFound { .. }));
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker and the HANA Express image"]
async fn test_connection_params_select_database() -> Result<()> {
    init_logging();

    let container = image().start().await?;
    let params = container.connection_params("?databaseName=SYSTEMDB").await?;
    assert_eq!(params.port, container.mapped_port(39017).await?);
    assert_eq!(params.user, "SYSTEM");
    assert_eq!(params.database_name.as_deref(), Some("SYSTEMDB"));

    let info = container.connection_info().await?;
    assert_eq!(info.ports.len(), 11);
    assert_eq!(info.test_query, "SELECT 1 FROM SYS.DUMMY");
    container.stop().await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker and the HANA Express image"]
async fn test_basic_query_on_system_db() -> Result<()> {
    init_logging();
    assert_test_query_on("SYSTEMDB").await
}

#[tokio::test]
#[ignore = "requires Docker and the HANA Express image"]
async fn test_basic_query_on_tenant_db() -> Result<()> {
    init_logging();
    assert_test_query_on("HXE").await
}

#[tokio::test]
#[ignore = "requires Docker and the HANA Express image"]
async fn test_query_with_init_script() -> Result<()> {
    init_logging();

    let driver = Arc::new(TcpCheckDriver::default());
    let connections = Arc::clone(&driver.connections);
    let executed = Arc::clone(&driver.executed);
    let container = image()
        .with_driver(driver)
        .with_init_script(init_script())
        .start()
        .await?;

    assert_eq!(
        *executed.lock().unwrap(),
        vec![
            "CREATE TABLE system.bar (foo VARCHAR(255))".to_string(),
            "INSERT INTO system.bar (foo) VALUES ('hello world')".to_string(),
        ]
    );
    let params = connections.lock().unwrap().clone();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].database_name, None);

    container.stop().await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker and the HANA Express image"]
async fn test_logs_contain_ready_message() -> Result<()> {
    init_logging();

    let container = image().start().await?;
    let logs = container.logs().await?;
    assert!(logs.starts_with("STDOUT:\n"));
    assert!(logs.contains("Startup finished!"));
    container.stop().await?;
    Ok(())
}
