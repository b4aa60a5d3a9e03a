//! Workflow backend error types

use nfd_types::WorkflowStatus;
use thiserror::Error;

/// Workflow backend errors
///
/// `Api` and `Unreachable` carry the same distinction as the registry
/// client: a non-success answer versus no answer at all. `WorkflowFailed`
/// and `Timeout` are the poller's terminal outcomes.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Workflow backend returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Workflow backend unreachable: {0}")]
    Unreachable(String),

    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),

    #[error("Workflow execution {execution_id} ended with status {status}")]
    WorkflowFailed {
        execution_id: String,
        status: WorkflowStatus,
    },

    #[error("Workflow execution {execution_id} still not terminal after {attempts} attempts")]
    Timeout {
        execution_id: String,
        attempts: u32,
    },

    #[error("Blueprint packaging failed: {0}")]
    Packaging(#[from] std::io::Error),
}

/// Result type for workflow operations
pub type Result<T> = std::result::Result<T, WorkflowError>;
