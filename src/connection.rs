//! Connections to a HANA container through a caller-supplied driver.
//!
//! No driver is linked in. Hand one to [`HanaImage::with_driver`]; without a
//! driver compatible with `com.sap.db.jdbc.Driver` every connection attempt
//! fails with [`HanaError::NoDriverFound`].

use std::path::Path;
use std::sync::Arc;

use db_container::{split_statements, ConnectionParams, JdbcDatabaseImage, SqlConnection, SqlDriver};
use tracing::{debug, info, warn};

use crate::error::{HanaError, Result};
use crate::image::{HanaImage, DRIVER_CLASS_NAME};

/// An open connection to HANA.
pub type HanaConnection = Box<dyn SqlConnection>;

/// Opens a connection with `driver`, provided it is a HANA driver.
pub async fn open_connection(
    driver: Option<&Arc<dyn SqlDriver>>,
    params: &ConnectionParams,
) -> Result<HanaConnection> {
    let driver = match driver {
        Some(driver) if driver.class_name() == DRIVER_CLASS_NAME => driver,
        Some(driver) => {
            warn!(
                "Ignoring driver {} (expected {})",
                driver.class_name(),
                DRIVER_CLASS_NAME
            );
            return Err(no_driver_found());
        }
        None => return Err(no_driver_found()),
    };

    driver
        .connect(params)
        .await
        .map_err(|e| HanaError::Driver(e.to_string()))
}

/// Executes `statements` in order, stopping at the first failure.
pub async fn execute_statements(
    connection: &dyn SqlConnection,
    script: &Path,
    statements: &[String],
) -> Result<()> {
    for (index, statement) in statements.iter().enumerate() {
        debug!("Executing init statement {}: {}", index, statement);
        connection
            .execute(statement)
            .await
            .map_err(|e| HanaError::InitStatement {
                path: script.to_path_buf(),
                index,
                message: e.to_string(),
            })?;
    }
    Ok(())
}

/// Reads, splits and executes the init script of `image` over a connection
/// opened with `params`. Returns the number of statements executed.
pub async fn run_init_script(image: &HanaImage, params: &ConnectionParams) -> Result<usize> {
    let Some(path) = image.init_script() else {
        return Ok(0);
    };

    info!("Running init script {}", path.display());
    let script = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| HanaError::InitScript {
            path: path.to_path_buf(),
            source,
        })?;
    let statements = split_statements(&script);

    let connection = open_connection(image.driver(), params).await?;
    execute_statements(connection.as_ref(), path, &statements).await?;

    info!("Executed {} init statements", statements.len());
    Ok(statements.len())
}

fn no_driver_found() -> HanaError {
    HanaError::NoDriverFound {
        driver: DRIVER_CLASS_NAME.to_string(),
    }
}
