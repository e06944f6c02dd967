//! HANA Express image configuration.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use db_container::{license, DockerImageName, JdbcDatabaseImage, RunningDatabase, SqlDriver};
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::{Image, ImageExt};
use tracing::{debug, info};

use crate::container::HanaContainer;
use crate::error::{HanaError, Result};
use crate::password::validate_password;

/// Database type identifier handled by this crate.
pub const NAME: &str = "hana";
pub const IMAGE: &str = "store/saplabs/hanaexpress";
pub const DEFAULT_TAG: &str = "2.00.045.00.20200121.1";
pub const DEFAULT_USER: &str = "SYSTEM";
pub const DEFAULT_PASSWORD: &str = "HXEHana1";
pub const DRIVER_CLASS_NAME: &str = "com.sap.db.jdbc.Driver";
pub const TEST_QUERY: &str = "SELECT 1 FROM SYS.DUMMY";

/// SQL port of the system database; tenants are reached through it with the
/// `databaseName` parameter.
pub const SQL_PORT: u16 = 39017;

pub const SERVICE_PORTS: [u16; 11] = [
    39013, 39017, 39041, 39042, 39043, 39044, 39045, 1128, 1129, 59013, 59014,
];

const EXPOSED_PORTS: [ContainerPort; 11] = [
    ContainerPort::Tcp(39013),
    ContainerPort::Tcp(39017),
    ContainerPort::Tcp(39041),
    ContainerPort::Tcp(39042),
    ContainerPort::Tcp(39043),
    ContainerPort::Tcp(39044),
    ContainerPort::Tcp(39045),
    ContainerPort::Tcp(1128),
    ContainerPort::Tcp(1129),
    ContainerPort::Tcp(59013),
    ContainerPort::Tcp(59014),
];

const READY_MESSAGE: &str = "Startup finished!";

/// Open file limit HANA requires at startup.
const NOFILE_LIMIT: i64 = 1_048_576;

/// HANA Express needs several minutes to initialise on first start.
pub const DEFAULT_STARTUP_TIMEOUT: Duration = Duration::from_secs(600);

/// Configuration of a HANA Express container that has not been started yet.
///
/// ```rust,ignore
/// let container = HanaImage::default()
///     .with_password("RandomPassword1")?
///     .with_driver(Arc::new(MyHanaDriver::default()))
///     .with_init_script("tests/fixtures/init_hana.sql")
///     .accept_license()
///     .start()
///     .await?;
/// let url = container.connection_url("?databaseName=HXE").await?;
/// ```
#[derive(Debug, Clone)]
pub struct HanaImage {
    image: DockerImageName,
    password: String,
    init_script: Option<PathBuf>,
    license_accepted: bool,
    startup_timeout: Duration,
    driver: Option<Arc<dyn SqlDriver>>,
}

impl HanaImage {
    pub fn new(image: DockerImageName) -> Self {
        Self {
            image,
            password: DEFAULT_PASSWORD.to_string(),
            init_script: None,
            license_accepted: false,
            startup_timeout: DEFAULT_STARTUP_TIMEOUT,
            driver: None,
        }
    }

    /// Sets the `SYSTEM` password, rejecting passwords that violate the
    /// composition policy.
    pub fn with_password(mut self, password: impl Into<String>) -> Result<Self> {
        let password = password.into();
        validate_password(&password)?;
        self.password = password;
        Ok(self)
    }

    /// SQL script executed against the system database after startup.
    pub fn with_init_script(mut self, path: impl Into<PathBuf>) -> Self {
        self.init_script = Some(path.into());
        self
    }

    /// Accepts the SAP HANA Express license on behalf of the caller.
    pub fn accept_license(mut self) -> Self {
        self.license_accepted = true;
        self
    }

    pub fn with_startup_timeout(mut self, timeout: Duration) -> Self {
        self.startup_timeout = timeout;
        self
    }

    /// Driver used for init scripts and [`HanaContainer::create_connection`].
    pub fn with_driver(mut self, driver: Arc<dyn SqlDriver>) -> Self {
        self.driver = Some(driver);
        self
    }

    pub fn driver(&self) -> Option<&Arc<dyn SqlDriver>> {
        self.driver.as_ref()
    }

    pub fn image_name(&self) -> &DockerImageName {
        &self.image
    }

    pub fn license_accepted(&self) -> bool {
        self.license_accepted
    }

    pub fn startup_timeout(&self) -> Duration {
        self.startup_timeout
    }

    pub fn exposed_ports(&self) -> &[u16] {
        &SERVICE_PORTS
    }

    /// Arguments passed to the image entrypoint.
    pub fn command_args(&self) -> Vec<String> {
        let mut args = vec!["--master-password".to_string(), self.password.clone()];
        if self.license_accepted {
            args.push("--agree-to-sap-license".to_string());
        }
        args
    }

    /// Starts the container, waits until HANA reports it is ready and runs
    /// the init script, if any.
    pub async fn start(self) -> Result<HanaContainer> {
        let image = self.resolve_license(&license::acceptance_file())?;

        info!("Starting HANA container from {}", image.image);
        let timeout = image.startup_timeout;
        let request = image
            .with_ulimit("nofile", NOFILE_LIMIT, Some(NOFILE_LIMIT))
            .with_startup_timeout(timeout);
        let running = RunningDatabase::start(request).await?;
        info!("HANA is ready!");

        let container = HanaContainer::new(running);
        container.run_init_script().await?;
        Ok(container)
    }

    /// Accepts the license if `acceptance_file` lists this image, so the
    /// entrypoint receives `--agree-to-sap-license` either way.
    fn resolve_license(self, acceptance_file: &Path) -> Result<Self> {
        if self.license_accepted {
            return Ok(self);
        }

        let reference = self.image.to_string();
        let accepted = license::is_listed_in(acceptance_file, &reference).map_err(|source| {
            HanaError::LicenseFile {
                path: acceptance_file.to_path_buf(),
                source,
            }
        })?;
        if !accepted {
            return Err(HanaError::LicenseNotAccepted { image: reference });
        }

        debug!(file = %acceptance_file.display(), "License accepted through acceptance file");
        Ok(self.accept_license())
    }
}

impl Default for HanaImage {
    fn default() -> Self {
        Self::new(DockerImageName::from_static(IMAGE, DEFAULT_TAG))
    }
}

impl Image for HanaImage {
    fn name(&self) -> &str {
        self.image.repository()
    }

    fn tag(&self) -> &str {
        self.image.tag()
    }

    fn ready_conditions(&self) -> Vec<WaitFor> {
        vec![WaitFor::message_on_stdout(READY_MESSAGE)]
    }

    fn cmd(&self) -> impl IntoIterator<Item = impl Into<Cow<'_, str>>> {
        self.command_args()
    }

    fn expose_ports(&self) -> &[ContainerPort] {
        &EXPOSED_PORTS
    }
}

impl JdbcDatabaseImage for HanaImage {
    fn driver_class_name(&self) -> &str {
        DRIVER_CLASS_NAME
    }

    fn username(&self) -> &str {
        DEFAULT_USER
    }

    fn password(&self) -> &str {
        &self.password
    }

    fn test_query_string(&self) -> &str {
        TEST_QUERY
    }

    fn sql_port(&self) -> u16 {
        SQL_PORT
    }

    fn service_ports(&self) -> &[u16] {
        &SERVICE_PORTS
    }

    fn jdbc_url(&self, host: &str, port: u16) -> String {
        format!("jdbc:sap://{host}:{port}/")
    }

    fn init_script(&self) -> Option<&Path> {
        self.init_script.as_deref()
    }
}
