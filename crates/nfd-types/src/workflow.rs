//! Workflow execution status reported by the backend

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of an asynchronous workflow execution
///
/// `Terminated` is the only success state. `Queued`, `Running`, and any
/// status string the backend adds later (`Other`) are non-terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowStatus {
    Queued,
    Running,
    Terminated,
    Cancelled,
    Failed,
    /// Unrecognized status string, treated as non-terminal
    Other(String),
}

impl WorkflowStatus {
    /// Whether no further status change can occur
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WorkflowStatus::Terminated | WorkflowStatus::Cancelled | WorkflowStatus::Failed
        )
    }

    /// Whether the workflow finished successfully
    pub fn is_success(&self) -> bool {
        matches!(self, WorkflowStatus::Terminated)
    }

    pub fn as_str(&self) -> &str {
        match self {
            WorkflowStatus::Queued => "queued",
            WorkflowStatus::Running => "running",
            WorkflowStatus::Terminated => "terminated",
            WorkflowStatus::Cancelled => "cancelled",
            WorkflowStatus::Failed => "failed",
            WorkflowStatus::Other(s) => s,
        }
    }
}

impl From<&str> for WorkflowStatus {
    fn from(s: &str) -> Self {
        match s {
            "queued" => WorkflowStatus::Queued,
            "running" => WorkflowStatus::Running,
            "terminated" => WorkflowStatus::Terminated,
            "cancelled" => WorkflowStatus::Cancelled,
            "failed" => WorkflowStatus::Failed,
            other => WorkflowStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for WorkflowStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WorkflowStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(WorkflowStatus::from(s.as_str()))
    }
}

/// One workflow execution on the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowExecution {
    /// Backend-assigned execution identifier
    #[serde(rename = "id")]
    pub execution_id: String,
    /// Last observed status
    pub status: WorkflowStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(WorkflowStatus::Terminated.is_terminal());
        assert!(WorkflowStatus::Cancelled.is_terminal());
        assert!(WorkflowStatus::Failed.is_terminal());
        assert!(!WorkflowStatus::Queued.is_terminal());
        assert!(!WorkflowStatus::Running.is_terminal());
        assert!(!WorkflowStatus::Other("pending".into()).is_terminal());
    }

    #[test]
    fn only_terminated_is_success() {
        assert!(WorkflowStatus::Terminated.is_success());
        assert!(!WorkflowStatus::Cancelled.is_success());
        assert!(!WorkflowStatus::Failed.is_success());
    }

    #[test]
    fn unknown_status_deserializes_as_other() {
        let execution: WorkflowExecution =
            serde_json::from_str(r#"{"id": "exec-1", "status": "force-cancelling"}"#).unwrap();
        assert_eq!(
            execution.status,
            WorkflowStatus::Other("force-cancelling".into())
        );
        assert_eq!(execution.execution_id, "exec-1");
    }
}
