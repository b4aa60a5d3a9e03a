//! Request enrichment pipeline
//!
//! Fixed-order validation and lookup chain applied to each inbound event
//! before any orchestration starts. Any step may short-circuit with a
//! classified error, which aborts the whole request; nothing here mutates
//! the registry.

use crate::error::{DispatchError, Result};
use crate::renderer::BlueprintRenderer;
use nfd_registry::ServiceRegistry;
use nfd_types::{
    Blueprint, DeployedService, DeploymentId, Event, LocationInfo, LocationMap, RequestId,
    ServiceAction, ShareableMap,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Work the orchestrator has to carry out for one event
#[derive(Debug)]
pub enum DispatchPlan {
    /// One deploy sequence per rendered blueprint
    Deploy(Vec<Blueprint>),
    /// One undeploy sequence per existing service
    Undeploy(Vec<DeployedService>),
}

/// A validated, enriched event ready for dispatch
#[derive(Debug)]
pub struct EnrichedRequest {
    /// Correlation id for all derived work
    pub request_id: RequestId,
    /// The original event
    pub event: Event,
    /// Location info resolved from the static table
    pub locations: LocationInfo,
    /// Shareable components at the event's location (deploy only; empty
    /// otherwise)
    pub shareables: ShareableMap,
    /// Per-target sequences to launch
    pub plan: DispatchPlan,
}

impl EnrichedRequest {
    /// Deployment ids the caller gets back in the acknowledgment
    pub fn deployment_ids(&self) -> Vec<DeploymentId> {
        match &self.plan {
            DispatchPlan::Deploy(blueprints) => blueprints
                .iter()
                .map(|b| b.deployment_id.clone())
                .collect(),
            DispatchPlan::Undeploy(services) => services
                .iter()
                .map(|s| s.deployment_id.clone())
                .collect(),
        }
    }
}

/// Ordered validation/lookup chain for inbound events
pub struct EnrichmentPipeline {
    registry: Arc<dyn ServiceRegistry>,
    locations: LocationMap,
    renderer: BlueprintRenderer,
}

impl EnrichmentPipeline {
    pub fn new(registry: Arc<dyn ServiceRegistry>, locations: LocationMap) -> Self {
        Self {
            registry,
            locations,
            renderer: BlueprintRenderer::new(),
        }
    }

    /// Run every enrichment step in order, short-circuiting on the first
    /// failure
    ///
    /// Steps: required fields, registry resolution, location validation,
    /// template expansion (deploy only). Content validation (the body must
    /// be JSON of the right shape) happens where the event is parsed.
    pub async fn enrich(&self, event: Event, request_id: RequestId) -> Result<EnrichedRequest> {
        self.check_required_fields(&event)?;

        // Registry resolution happens before location validation so a
        // deploy with nothing to deploy is reported as such, not as a
        // location problem
        let resolution = self.resolve_from_registry(&event, &request_id).await?;

        let locations = self.check_location(&event)?;

        let (shareables, plan) = match resolution {
            Resolution::Templates(templates, shareables) => {
                let context = BlueprintRenderer::context(&event, &locations, &shareables);
                let blueprints = self.renderer.render_all(&templates, &context)?;
                for blueprint in &blueprints {
                    self.registry
                        .verify_unique_deployment_id(&blueprint.deployment_id)
                        .await?;
                }
                debug!(
                    request_id = %request_id,
                    count = blueprints.len(),
                    "expanded blueprint templates"
                );
                (shareables, DispatchPlan::Deploy(blueprints))
            }
            Resolution::Services(services) => {
                (ShareableMap::new(), DispatchPlan::Undeploy(services))
            }
        };

        Ok(EnrichedRequest {
            request_id,
            event,
            locations,
            shareables,
            plan,
        })
    }

    fn check_required_fields(&self, event: &Event) -> Result<()> {
        let missing = event.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DispatchError::BadRequest(format!(
                "Request missing required properties: {}",
                missing.join(",")
            )))
        }
    }

    async fn resolve_from_registry(
        &self,
        event: &Event,
        request_id: &RequestId,
    ) -> Result<Resolution> {
        match event.service_action {
            ServiceAction::Deploy => {
                let templates = self
                    .registry
                    .find_templates(
                        &event.target_type,
                        &event.service_location,
                        event.service_type.as_deref(),
                    )
                    .await?;
                if templates.is_empty() {
                    let tuple = format!(
                        "{}/{}/{}",
                        event.target_type,
                        event.service_location,
                        event.service_type.as_deref().unwrap_or("unspecified")
                    );
                    return Err(DispatchError::BadRequest(format!(
                        "{tuple} has no associated service types"
                    )));
                }
                info!(
                    request_id = %request_id,
                    count = templates.len(),
                    "matched blueprint templates"
                );

                let shareables = self
                    .registry
                    .find_shareables(&event.service_location)
                    .await?;
                Ok(Resolution::Templates(templates, shareables))
            }
            ServiceAction::Undeploy => {
                let services = self.registry.find_services(&event.target_name).await?;
                if services.is_empty() {
                    return Err(DispatchError::BadRequest(format!(
                        "\"{}\" has no deployed services",
                        event.target_name
                    )));
                }
                info!(
                    request_id = %request_id,
                    count = services.len(),
                    "found deployed services"
                );
                Ok(Resolution::Services(services))
            }
        }
    }

    fn check_location(&self, event: &Event) -> Result<LocationInfo> {
        self.locations
            .resolve(&event.service_location)
            .ok_or_else(|| {
                DispatchError::BadRequest(format!(
                    "\"{}\" is not a supported location",
                    event.service_location
                ))
            })
    }
}

enum Resolution {
    Templates(Vec<nfd_types::Template>, ShareableMap),
    Services(Vec<DeployedService>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use nfd_registry::InMemoryServiceRegistry;
    use nfd_types::{LocationEntry, ServiceRecord, Template};

    fn locations() -> LocationMap {
        let mut map = LocationMap::new();
        map.insert(
            "central",
            LocationEntry {
                central: Some("https://central.example".to_string()),
                local: None,
            },
        );
        map.insert(
            "east",
            LocationEntry {
                central: None,
                local: Some("https://east.example".to_string()),
            },
        );
        map
    }

    fn deploy_event() -> Event {
        serde_json::from_value(serde_json::json!({
            "target_name": "vnf1",
            "target_type": "vFW",
            "service_action": "deploy",
            "service_location": "east"
        }))
        .unwrap()
    }

    fn undeploy_event() -> Event {
        serde_json::from_value(serde_json::json!({
            "target_name": "vnf1",
            "target_type": "vFW",
            "service_action": "undeploy",
            "service_location": "east"
        }))
        .unwrap()
    }

    fn pipeline(registry: Arc<InMemoryServiceRegistry>) -> EnrichmentPipeline {
        EnrichmentPipeline::new(registry, locations())
    }

    #[tokio::test]
    async fn missing_fields_reject_before_any_registry_call() {
        let registry = Arc::new(InMemoryServiceRegistry::new());
        let pipeline = pipeline(registry.clone());

        let event: Event = serde_json::from_value(serde_json::json!({
            "service_action": "deploy",
            "service_location": "east"
        }))
        .unwrap();

        let err = pipeline
            .enrich(event, RequestId::generate())
            .await
            .unwrap_err();
        match err {
            DispatchError::BadRequest(message) => {
                assert!(message.contains("target_name"));
                assert!(message.contains("target_type"));
            }
            other => panic!("expected BadRequest, got {other:?}"),
        }
        assert_eq!(registry.lookup_count(), 0);
    }

    #[tokio::test]
    async fn zero_templates_names_the_parameter_tuple() {
        let registry = Arc::new(InMemoryServiceRegistry::new());
        let pipeline = pipeline(registry);

        let err = pipeline
            .enrich(deploy_event(), RequestId::generate())
            .await
            .unwrap_err();
        match err {
            DispatchError::BadRequest(message) => {
                assert!(message.contains("vFW/east/unspecified"), "got: {message}");
            }
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn deploy_produces_one_blueprint_per_template() {
        let registry = Arc::new(InMemoryServiceRegistry::new());
        registry.put_template(
            "vFW",
            "east",
            None,
            Template {
                type_id: "fw-monitor".into(),
                template_body: "name: {{target_name}}".into(),
            },
        );
        registry.put_template(
            "vFW",
            "east",
            None,
            Template {
                type_id: "fw-collector".into(),
                template_body: "local: {{locations.local.local}}".into(),
            },
        );
        let pipeline = pipeline(registry);

        let enriched = pipeline
            .enrich(deploy_event(), RequestId::generate())
            .await
            .unwrap();
        let ids = enriched.deployment_ids();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
        match enriched.plan {
            DispatchPlan::Deploy(blueprints) => {
                assert_eq!(blueprints[0].rendered_body, "name: vnf1");
                assert_eq!(blueprints[1].rendered_body, "local: https://east.example");
            }
            other => panic!("expected deploy plan, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn deploy_context_includes_shareables() {
        let registry = Arc::new(InMemoryServiceRegistry::new());
        registry.put_shareable("east", "collector", "c-9");
        registry.put_template(
            "vFW",
            "east",
            None,
            Template {
                type_id: "fw-monitor".into(),
                template_body: "uses: {{shareables.collector}}".into(),
            },
        );
        let pipeline = pipeline(registry);

        let enriched = pipeline
            .enrich(deploy_event(), RequestId::generate())
            .await
            .unwrap();
        match enriched.plan {
            DispatchPlan::Deploy(blueprints) => {
                assert_eq!(blueprints[0].rendered_body, "uses: c-9");
            }
            other => panic!("expected deploy plan, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_location_rejects() {
        let registry = Arc::new(InMemoryServiceRegistry::new());
        registry.put_template(
            "vFW",
            "west",
            None,
            Template {
                type_id: "fw-monitor".into(),
                template_body: "x".into(),
            },
        );
        let pipeline = pipeline(registry);

        let mut event = deploy_event();
        event.service_location = "west".to_string();
        let err = pipeline
            .enrich(event, RequestId::generate())
            .await
            .unwrap_err();
        match err {
            DispatchError::BadRequest(message) => {
                assert!(message.contains("not a supported location"));
            }
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn bad_template_rejects_as_client_error() {
        let registry = Arc::new(InMemoryServiceRegistry::new());
        registry.put_template(
            "vFW",
            "east",
            None,
            Template {
                type_id: "fw-monitor".into(),
                template_body: "{{field_the_event_lacks}}".into(),
            },
        );
        let pipeline = pipeline(registry);

        let err = pipeline
            .enrich(deploy_event(), RequestId::generate())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn undeploy_resolves_existing_services() {
        let registry = Arc::new(InMemoryServiceRegistry::new());
        registry.put_service(ServiceRecord {
            deployment_id: DeploymentId::new("dep-1"),
            type_id: "fw-monitor".into(),
            target_id: "vnf1".into(),
            target_type: "vFW".into(),
            location: "east".into(),
        });
        registry.put_service(ServiceRecord {
            deployment_id: DeploymentId::new("dep-2"),
            type_id: "fw-collector".into(),
            target_id: "vnf1".into(),
            target_type: "vFW".into(),
            location: "east".into(),
        });
        let pipeline = pipeline(registry);

        let enriched = pipeline
            .enrich(undeploy_event(), RequestId::generate())
            .await
            .unwrap();
        assert_eq!(enriched.deployment_ids().len(), 2);
        assert!(matches!(enriched.plan, DispatchPlan::Undeploy(_)));
    }

    #[tokio::test]
    async fn undeploy_with_no_services_rejects() {
        let registry = Arc::new(InMemoryServiceRegistry::new());
        let pipeline = pipeline(registry);

        let err = pipeline
            .enrich(undeploy_event(), RequestId::generate())
            .await
            .unwrap_err();
        match err {
            DispatchError::BadRequest(message) => {
                assert!(message.contains("vnf1"));
            }
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }
}
