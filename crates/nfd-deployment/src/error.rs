//! Dispatch error types

use nfd_registry::RegistryError;
use nfd_workflow::WorkflowError;
use thiserror::Error;

/// Errors surfaced by the pipeline and orchestrator
///
/// `BadRequest` covers everything the sender can fix (malformed or
/// incomplete event, unknown location, unmatched template tuple, bad
/// template). Registry and workflow errors keep their own taxonomy so the
/// reachable/broken distinction survives to the HTTP layer.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}

impl DispatchError {
    /// HTTP status this error maps to when reported synchronously
    pub fn status_code(&self) -> u16 {
        match self {
            DispatchError::BadRequest(_) => 400,
            DispatchError::Registry(RegistryError::Conflict(_)) => 409,
            DispatchError::Registry(RegistryError::Unreachable(_)) => 503,
            DispatchError::Registry(_) => 502,
            DispatchError::Workflow(WorkflowError::Unreachable(_)) => 503,
            DispatchError::Workflow(_) => 502,
        }
    }
}

/// Result type for dispatch operations
pub type Result<T> = std::result::Result<T, DispatchError>;
