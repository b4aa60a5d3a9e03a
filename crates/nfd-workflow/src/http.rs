//! HTTP client for the workflow-execution backend

use crate::client::WorkflowBackend;
use crate::error::{Result, WorkflowError};
use crate::package::package_blueprint;
use async_trait::async_trait;
use nfd_types::{DeploymentId, WorkflowStatus};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection details for the workflow backend
#[derive(Debug, Clone)]
pub struct WorkflowEndpoint {
    /// Base URL, e.g. `https://workflow-manager`
    pub url: String,
    /// Optional basic-auth user
    pub user: Option<String>,
    /// Optional basic-auth password
    pub password: Option<String>,
}

impl WorkflowEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user: None,
            password: None,
        }
    }
}

/// Workflow backend client over HTTP
pub struct HttpWorkflowBackend {
    client: Client,
    base_url: String,
    user: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateDeploymentBody<'a> {
    blueprint_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    inputs: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct ExecuteWorkflowBody<'a> {
    deployment_id: &'a str,
    workflow_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExecutionAccepted {
    #[serde(default)]
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExecutionStatusBody {
    status: WorkflowStatus,
}

impl HttpWorkflowBackend {
    /// Create a client for the given backend endpoint
    pub fn new(endpoint: WorkflowEndpoint) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| WorkflowError::Unreachable(e.to_string()))?;

        Ok(Self {
            client,
            base_url: endpoint.url.trim_end_matches('/').to_string(),
            user: endpoint.user,
            password: endpoint.password,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.user {
            Some(user) => builder.basic_auth(user, self.password.as_deref()),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        self.authorize(builder)
            .send()
            .await
            .map_err(|e| WorkflowError::Unreachable(e.to_string()))
    }

    async fn expect_success(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(api_error(status, response).await)
        }
    }
}

async fn api_error(status: StatusCode, response: Response) -> WorkflowError {
    let message = response.text().await.unwrap_or_default();
    WorkflowError::Api {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl WorkflowBackend for HttpWorkflowBackend {
    async fn upload_blueprint(&self, deployment_id: &DeploymentId, blueprint: &str) -> Result<()> {
        // Packaging touches the filesystem; keep it off the async runtime
        let blueprint = blueprint.to_string();
        let archive = tokio::task::spawn_blocking(move || package_blueprint(&blueprint))
            .await
            .map_err(|e| WorkflowError::Packaging(std::io::Error::other(e)))??;

        let request = self
            .client
            .put(self.url(&format!("/blueprints/{}", deployment_id.as_str())))
            .header("Content-Type", "application/octet-stream")
            .body(archive);
        let response = self.send(request).await?;
        self.expect_success(response).await?;
        Ok(())
    }

    async fn create_deployment(
        &self,
        deployment_id: &DeploymentId,
        blueprint_id: &DeploymentId,
        inputs: Option<serde_json::Value>,
    ) -> Result<()> {
        let body = CreateDeploymentBody {
            blueprint_id: blueprint_id.as_str(),
            inputs,
        };
        let request = self
            .client
            .put(self.url(&format!("/deployments/{}", deployment_id.as_str())))
            .json(&body);
        let response = self.send(request).await?;
        self.expect_success(response).await?;
        Ok(())
    }

    async fn execute_workflow(
        &self,
        deployment_id: &DeploymentId,
        workflow: &str,
    ) -> Result<String> {
        let body = ExecuteWorkflowBody {
            deployment_id: deployment_id.as_str(),
            workflow_id: workflow,
        };
        let request = self.client.post(self.url("/executions")).json(&body);
        let response = self.send(request).await?;
        let response = self.expect_success(response).await?;

        // The backend accepted the workflow; an acceptance body without an
        // execution id leaves us nothing to poll, which is a backend fault
        let accepted: ExecutionAccepted = response
            .json()
            .await
            .map_err(|e| WorkflowError::MalformedResponse(e.to_string()))?;
        accepted.id.ok_or_else(|| {
            WorkflowError::MalformedResponse(
                "workflow accepted but no execution id in response".to_string(),
            )
        })
    }

    async fn execution_status(&self, execution_id: &str) -> Result<WorkflowStatus> {
        let request = self
            .client
            .get(self.url(&format!("/executions/{execution_id}")));
        let response = self.send(request).await?;
        let response = self.expect_success(response).await?;
        let body: ExecutionStatusBody = response
            .json()
            .await
            .map_err(|e| WorkflowError::MalformedResponse(e.to_string()))?;
        Ok(body.status)
    }
}
