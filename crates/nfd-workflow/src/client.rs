//! Workflow backend trait

use crate::error::Result;
use async_trait::async_trait;
use nfd_types::{DeploymentId, WorkflowStatus};

/// Name of the workflow that installs a deployment
pub const INSTALL_WORKFLOW: &str = "install";

/// Name of the workflow that uninstalls a deployment
pub const UNINSTALL_WORKFLOW: &str = "uninstall";

/// The operation set NFD needs from the workflow-execution backend
#[async_trait]
pub trait WorkflowBackend: Send + Sync {
    /// Package `blueprint` into the backend's transport format and upload
    /// it under `deployment_id`
    ///
    /// The transient working directory used for packaging is removed on
    /// success and failure alike.
    async fn upload_blueprint(&self, deployment_id: &DeploymentId, blueprint: &str) -> Result<()>;

    /// Register a deployment entity from an uploaded blueprint
    async fn create_deployment(
        &self,
        deployment_id: &DeploymentId,
        blueprint_id: &DeploymentId,
        inputs: Option<serde_json::Value>,
    ) -> Result<()>;

    /// Start a workflow against a deployment, returning the execution id
    /// used for polling
    async fn execute_workflow(
        &self,
        deployment_id: &DeploymentId,
        workflow: &str,
    ) -> Result<String>;

    /// Last observed status of an execution
    async fn execution_status(&self, execution_id: &str) -> Result<WorkflowStatus>;
}
