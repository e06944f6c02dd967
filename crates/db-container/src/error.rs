//! Error types for db-container.

use thiserror::Error;

/// Errors raised while parsing a Docker image reference.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageNameError {
    #[error("Image reference is empty")]
    Empty,

    #[error("Invalid image repository '{0}'")]
    InvalidRepository(String),

    #[error("Invalid image tag '{tag}' for '{reference}'")]
    InvalidTag { reference: String, tag: String },

    #[error("Image digests are not supported: {0}")]
    DigestUnsupported(String),
}

/// Errors raised by a running database container.
#[derive(Error, Debug)]
pub enum Error {
    /// Failures of the container runtime, surfaced unchanged.
    #[error(transparent)]
    Runtime(#[from] testcontainers::TestcontainersError),

    #[error("Port {0} is not declared by this image")]
    UndeclaredPort(u16),
}

/// Result type alias for db-container operations.
pub type Result<T> = std::result::Result<T, Error>;
