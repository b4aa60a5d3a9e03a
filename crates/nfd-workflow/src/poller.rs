//! Completion poller
//!
//! Waits for an asynchronous workflow execution to reach a terminal state
//! by polling its status at a fixed interval, up to a bounded number of
//! attempts. Implemented as a plain loop so the attempt ceiling bounds
//! resources as well as time.

use crate::client::WorkflowBackend;
use crate::error::{Result, WorkflowError};
use std::time::Duration;
use tracing::{debug, warn};

/// Poller tuning knobs
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Delay between status checks
    pub interval: Duration,
    /// Maximum number of status checks before giving up
    pub max_attempts: u32,
}

impl Default for PollerConfig {
    fn default() -> Self {
        // Every 15 seconds, up to an hour
        Self {
            interval: Duration::from_secs(15),
            max_attempts: 240,
        }
    }
}

/// Poll `execution_id` until it reaches a terminal state
///
/// Resolves with `Ok(())` only when the backend reports `terminated`.
/// `cancelled` or `failed` yield `WorkflowError::WorkflowFailed` carrying
/// the final status; exhausting the attempt budget without a terminal
/// state yields `WorkflowError::Timeout`. A poll that fails in transport
/// consumes an attempt but does not end the wait; the workflow may still
/// be running.
pub async fn poll_to_completion(
    backend: &dyn WorkflowBackend,
    execution_id: &str,
    config: &PollerConfig,
) -> Result<()> {
    for attempt in 1..=config.max_attempts {
        match backend.execution_status(execution_id).await {
            Ok(status) if status.is_success() => {
                debug!(execution_id, attempt, "workflow terminated");
                return Ok(());
            }
            Ok(status) if status.is_terminal() => {
                return Err(WorkflowError::WorkflowFailed {
                    execution_id: execution_id.to_string(),
                    status,
                });
            }
            Ok(status) => {
                debug!(execution_id, attempt, %status, "workflow not yet terminal");
            }
            Err(e) => {
                warn!(execution_id, attempt, error = %e, "status poll failed, will retry");
            }
        }

        if attempt < config.max_attempts {
            tokio::time::sleep(config.interval).await;
        }
    }

    Err(WorkflowError::Timeout {
        execution_id: execution_id.to_string(),
        attempts: config.max_attempts,
    })
}
