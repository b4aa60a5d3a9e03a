//! Deployment orchestrator
//!
//! Drives deploy and undeploy sequences end-to-end. Each per-target
//! sequence runs as its own spawned task; sequences share nothing and
//! never depend on each other's outcome. The caller gets the generated
//! deployment ids back as soon as every sequence is launched; workflow
//! outcomes are only ever logged.

use crate::pipeline::{DispatchPlan, EnrichedRequest};
use nfd_registry::ServiceRegistry;
use nfd_types::{Blueprint, DeployedService, DeploymentId, RequestId, ServiceRecord};
use nfd_workflow::{
    poll_to_completion, PollerConfig, WorkflowBackend, INSTALL_WORKFLOW, UNINSTALL_WORKFLOW,
};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Launches and supervises deploy/undeploy sequences
pub struct DeploymentOrchestrator {
    backend: Arc<dyn WorkflowBackend>,
    registry: Arc<dyn ServiceRegistry>,
    poller: PollerConfig,
}

impl DeploymentOrchestrator {
    pub fn new(
        backend: Arc<dyn WorkflowBackend>,
        registry: Arc<dyn ServiceRegistry>,
        poller: PollerConfig,
    ) -> Self {
        Self {
            backend,
            registry,
            poller,
        }
    }

    /// Launch one sequence per planned blueprint or service and return
    /// the deployment ids immediately
    ///
    /// Failures inside a launched sequence are logged with the request's
    /// correlation id; they never reach the caller, who has already been
    /// answered.
    pub fn dispatch(&self, request: EnrichedRequest) -> Vec<DeploymentId> {
        let deployment_ids = request.deployment_ids();
        let request_id = request.request_id;

        match request.plan {
            DispatchPlan::Deploy(blueprints) => {
                info!(
                    request_id = %request_id,
                    count = blueprints.len(),
                    "launching deploy sequences"
                );
                for blueprint in blueprints {
                    let record = ServiceRecord {
                        deployment_id: blueprint.deployment_id.clone(),
                        type_id: blueprint.type_id.clone(),
                        target_id: request.event.target_name.clone(),
                        target_type: request.event.target_type.clone(),
                        location: request.event.service_location.clone(),
                    };
                    tokio::spawn(deploy_sequence(
                        self.backend.clone(),
                        self.registry.clone(),
                        self.poller.clone(),
                        request_id.clone(),
                        blueprint,
                        record,
                    ));
                }
            }
            DispatchPlan::Undeploy(services) => {
                info!(
                    request_id = %request_id,
                    count = services.len(),
                    "launching undeploy sequences"
                );
                for service in services {
                    tokio::spawn(undeploy_sequence(
                        self.backend.clone(),
                        self.registry.clone(),
                        self.poller.clone(),
                        request_id.clone(),
                        service,
                    ));
                }
            }
        }

        deployment_ids
    }
}

/// Upload, create, install, poll, then record the service
///
/// A failure at any step ends the sequence; nothing already created on
/// the backend is rolled back. The registry entry is only written after
/// the install workflow terminates successfully.
async fn deploy_sequence(
    backend: Arc<dyn WorkflowBackend>,
    registry: Arc<dyn ServiceRegistry>,
    poller: PollerConfig,
    request_id: RequestId,
    blueprint: Blueprint,
    record: ServiceRecord,
) {
    let deployment_id = blueprint.deployment_id.clone();
    debug!(request_id = %request_id, deployment_id = %deployment_id, "deploy sequence starting");

    let outcome = async {
        backend
            .upload_blueprint(&deployment_id, &blueprint.rendered_body)
            .await?;
        backend
            .create_deployment(&deployment_id, &deployment_id, None)
            .await?;
        let execution_id = backend
            .execute_workflow(&deployment_id, INSTALL_WORKFLOW)
            .await?;
        poll_to_completion(backend.as_ref(), &execution_id, &poller).await
    }
    .await;

    match outcome {
        Ok(()) => {
            info!(request_id = %request_id, deployment_id = %deployment_id, "deployed");
            if let Err(e) = registry.add_service(record).await {
                error!(
                    request_id = %request_id,
                    deployment_id = %deployment_id,
                    error = %e,
                    "deployed but failed to update registry"
                );
            } else {
                info!(
                    request_id = %request_id,
                    deployment_id = %deployment_id,
                    "registry updated"
                );
            }
        }
        Err(e) => {
            error!(
                request_id = %request_id,
                deployment_id = %deployment_id,
                error = %e,
                "deploy sequence failed"
            );
        }
    }
}

/// Run the uninstall workflow, then remove the service record
///
/// If anything fails before the delete, the registry entry stays put so a
/// retried undeploy finds the service again.
async fn undeploy_sequence(
    backend: Arc<dyn WorkflowBackend>,
    registry: Arc<dyn ServiceRegistry>,
    poller: PollerConfig,
    request_id: RequestId,
    service: DeployedService,
) {
    let deployment_id = service.deployment_id.clone();
    debug!(request_id = %request_id, deployment_id = %deployment_id, "undeploy sequence starting");

    let outcome = async {
        let execution_id = backend
            .execute_workflow(&deployment_id, UNINSTALL_WORKFLOW)
            .await?;
        poll_to_completion(backend.as_ref(), &execution_id, &poller).await
    }
    .await;

    match outcome {
        Ok(()) => {
            info!(request_id = %request_id, deployment_id = %deployment_id, "undeployed");
            if let Err(e) = registry.delete_service(&deployment_id).await {
                error!(
                    request_id = %request_id,
                    deployment_id = %deployment_id,
                    error = %e,
                    "undeployed but failed to delete registry entry"
                );
            }
        }
        Err(e) => {
            error!(
                request_id = %request_id,
                deployment_id = %deployment_id,
                error = %e,
                "undeploy sequence failed"
            );
        }
    }
}
