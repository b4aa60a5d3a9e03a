//! API router configuration

use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::server_info))
        .route("/health", get(handlers::health_check))
        .route("/events", post(handlers::post_event))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use nfd_deployment::{DeploymentOrchestrator, EnrichmentPipeline};
    use nfd_registry::InMemoryServiceRegistry;
    use nfd_types::{DeploymentId, LocationEntry, LocationMap, Template, WorkflowStatus};
    use nfd_workflow::{PollerConfig, Result as WorkflowResult, WorkflowBackend};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    /// Backend where every workflow terminates immediately
    struct InstantBackend;

    #[async_trait]
    impl WorkflowBackend for InstantBackend {
        async fn upload_blueprint(&self, _: &DeploymentId, _: &str) -> WorkflowResult<()> {
            Ok(())
        }

        async fn create_deployment(
            &self,
            _: &DeploymentId,
            _: &DeploymentId,
            _: Option<serde_json::Value>,
        ) -> WorkflowResult<()> {
            Ok(())
        }

        async fn execute_workflow(&self, _: &DeploymentId, _: &str) -> WorkflowResult<String> {
            Ok("exec-1".to_string())
        }

        async fn execution_status(&self, _: &str) -> WorkflowResult<WorkflowStatus> {
            Ok(WorkflowStatus::Terminated)
        }
    }

    fn app(registry: Arc<InMemoryServiceRegistry>) -> Router {
        let mut locations = LocationMap::new();
        locations.insert(
            "east",
            LocationEntry {
                central: None,
                local: Some("https://east.example".to_string()),
            },
        );
        let pipeline = Arc::new(EnrichmentPipeline::new(registry.clone(), locations));
        let orchestrator = Arc::new(DeploymentOrchestrator::new(
            Arc::new(InstantBackend),
            registry,
            PollerConfig {
                interval: Duration::from_millis(1),
                max_attempts: 5,
            },
        ));
        create_router(AppState::new(pipeline, orchestrator))
    }

    fn post_event(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/events")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn accepted_event_returns_202_with_ids() {
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

        let response = app(registry)
            .oneshot(post_event(serde_json::json!({
                "target_name": "vnf1",
                "target_type": "vFW",
                "service_action": "deploy",
                "service_location": "east"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let body = body_json(response).await;
        assert!(body["requestId"].is_string());
        assert_eq!(body["deploymentIds"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn inbound_request_id_is_echoed() {
        let registry = Arc::new(InMemoryServiceRegistry::new());
        registry.put_template(
            "vFW",
            "east",
            None,
            Template {
                type_id: "fw-monitor".into(),
                template_body: "x".into(),
            },
        );

        let request = Request::builder()
            .method("POST")
            .uri("/events")
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-request-id", "corr-42")
            .body(Body::from(
                serde_json::json!({
                    "target_name": "vnf1",
                    "target_type": "vFW",
                    "service_action": "deploy",
                    "service_location": "east"
                })
                .to_string(),
            ))
            .unwrap();

        let response = app(registry).oneshot(request).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["requestId"], "corr-42");
    }

    #[tokio::test]
    async fn missing_fields_reject_with_400() {
        let registry = Arc::new(InMemoryServiceRegistry::new());
        let response = app(registry)
            .oneshot(post_event(serde_json::json!({
                "service_action": "deploy",
                "service_location": "east"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["status"], 400);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("target_name"));
    }

    #[tokio::test]
    async fn non_json_body_rejects_with_400() {
        let registry = Arc::new(InMemoryServiceRegistry::new());
        let request = Request::builder()
            .method("POST")
            .uri("/events")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("this is not json"))
            .unwrap();

        let response = app(registry).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn zero_matching_templates_reject_with_400() {
        let registry = Arc::new(InMemoryServiceRegistry::new());
        let response = app(registry)
            .oneshot(post_event(serde_json::json!({
                "target_name": "vnf1",
                "target_type": "vFW",
                "service_action": "deploy",
                "service_location": "east"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("vFW/east/unspecified"));
    }

    #[tokio::test]
    async fn health_endpoint_responds() {
        let registry = Arc::new(InMemoryServiceRegistry::new());
        let request = Request::builder()
            .method("GET")
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app(registry).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn info_endpoint_links_events() {
        let registry = Arc::new(InMemoryServiceRegistry::new());
        let request = Request::builder()
            .method("GET")
            .uri("/")
            .body(Body::empty())
            .unwrap();

        let response = app(registry).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["links"]["events"], "/events");
    }
}
