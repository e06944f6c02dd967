//! Error types for hana-container.

use std::path::PathBuf;

use thiserror::Error;

use crate::password::PASSWORD_POLICY_MESSAGE;

/// Errors raised while configuring, starting or connecting to a HANA
/// container.
#[derive(Error, Debug)]
pub enum HanaError {
    #[error("{}", PASSWORD_POLICY_MESSAGE)]
    InvalidPassword,

    #[error("Could not find a suitable driver ({driver}); pass one with HanaImage::with_driver")]
    NoDriverFound { driver: String },

    #[error(
        "The license for image '{image}' has not been accepted; call accept_license() \
         or list the image in the license acceptance file"
    )]
    LicenseNotAccepted { image: String },

    #[error("Failed to read license acceptance file {}: {source}", .path.display())]
    LicenseFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read init script {}: {source}", .path.display())]
    InitScript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Statement {index} of init script {} failed: {message}", .path.display())]
    InitStatement {
        path: PathBuf,
        index: usize,
        message: String,
    },

    #[error("Driver error: {0}")]
    Driver(String),

    #[error(transparent)]
    Container(#[from] db_container::Error),
}

/// Result type alias for hana-container operations.
pub type Result<T> = std::result::Result<T, HanaError>;
