//! Registry error types

use nfd_types::DeploymentId;
use thiserror::Error;

/// Registry errors
///
/// `Api` means the registry answered with a non-success status (the remote
/// system is broken); `Unreachable` means the request never got an answer
/// (the remote system is unreachable). Callers treat the two differently.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Registry returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Registry unreachable: {0}")]
    Unreachable(String),

    #[error("Deployment id already in use: {0}")]
    Conflict(DeploymentId),

    #[error("Malformed registry response: {0}")]
    MalformedResponse(String),
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;
