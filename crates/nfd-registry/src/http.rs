//! HTTP client for the service registry

use crate::client::ServiceRegistry;
use crate::error::{RegistryError, Result};
use async_trait::async_trait;
use nfd_types::{DeployedService, DeploymentId, ServiceRecord, ShareableMap, Template};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const SERVICE_TYPES_PATH: &str = "/service-types";
const SERVICES_PATH: &str = "/services";

/// Connection details for the registry
#[derive(Debug, Clone)]
pub struct RegistryEndpoint {
    /// Base URL, e.g. `https://registry:8443`
    pub url: String,
    /// Optional basic-auth user
    pub user: Option<String>,
    /// Optional basic-auth password
    pub password: Option<String>,
}

impl RegistryEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user: None,
            password: None,
        }
    }
}

/// Service registry client over HTTP
pub struct HttpServiceRegistry {
    client: Client,
    base_url: String,
    user: Option<String>,
    password: Option<String>,
}

/// Paged item container used by all registry list responses
#[derive(Debug, Deserialize)]
struct Items<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ServiceTypeItem {
    #[serde(rename = "typeName")]
    type_name: String,
    #[serde(rename = "blueprintTemplate")]
    blueprint_template: String,
}

#[derive(Debug, Deserialize)]
struct ServiceItem {
    #[serde(rename = "typeId")]
    type_id: String,
    #[serde(rename = "deploymentRef")]
    deployment_ref: String,
}

#[derive(Debug, Deserialize)]
struct LocatedServiceItem {
    #[serde(default)]
    components: Vec<ComponentItem>,
}

#[derive(Debug, Deserialize)]
struct ComponentItem {
    #[serde(rename = "componentType")]
    component_type: String,
    #[serde(rename = "componentId")]
    component_id: String,
    #[serde(default)]
    shareable: u8,
}

/// Wire form of a service record PUT
#[derive(Debug, Serialize)]
struct ServiceRecordBody<'a> {
    #[serde(rename = "typeId")]
    type_id: &'a str,
    #[serde(rename = "targetId")]
    target_id: &'a str,
    #[serde(rename = "targetType")]
    target_type: &'a str,
    location: &'a str,
    #[serde(rename = "deploymentRef")]
    deployment_ref: &'a str,
}

impl HttpServiceRegistry {
    /// Create a client for the given registry endpoint
    pub fn new(endpoint: RegistryEndpoint) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| RegistryError::Unreachable(e.to_string()))?;

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
        let response = self
            .authorize(builder)
            .send()
            .await
            .map_err(|e| RegistryError::Unreachable(e.to_string()))?;
        debug!(status = %response.status(), url = %response.url(), "registry responded");
        Ok(response)
    }

    /// Treat 404 as "no match"; any other non-success is an API error
    async fn read_items<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<Vec<T>> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(api_error(status, response).await);
        }
        let items: Items<T> = response
            .json()
            .await
            .map_err(|e| RegistryError::MalformedResponse(e.to_string()))?;
        Ok(items.items)
    }

    async fn expect_success(&self, response: Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(api_error(status, response).await)
        }
    }
}

async fn api_error(status: StatusCode, response: Response) -> RegistryError {
    let message = response.text().await.unwrap_or_default();
    RegistryError::Api {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl ServiceRegistry for HttpServiceRegistry {
    async fn find_templates(
        &self,
        target_type: &str,
        location: &str,
        service_type: Option<&str>,
    ) -> Result<Vec<Template>> {
        let mut query = vec![
            ("targetType", target_type),
            ("serviceLocation", location),
        ];
        if let Some(service_type) = service_type {
            query.push(("serviceType", service_type));
        }

        let request = self.client.get(self.url(SERVICE_TYPES_PATH)).query(&query);
        let response = self.send(request).await?;
        let items: Vec<ServiceTypeItem> = self.read_items(response).await?;

        Ok(items
            .into_iter()
            .map(|i| Template {
                type_id: i.type_name,
                template_body: i.blueprint_template,
            })
            .collect())
    }

    async fn find_services(&self, target_id: &str) -> Result<Vec<DeployedService>> {
        let request = self
            .client
            .get(self.url(SERVICES_PATH))
            .query(&[("targetId", target_id)]);
        let response = self.send(request).await?;
        let items: Vec<ServiceItem> = self.read_items(response).await?;

        Ok(items
            .into_iter()
            .map(|i| DeployedService {
                type_id: i.type_id,
                deployment_id: DeploymentId::new(i.deployment_ref),
            })
            .collect())
    }

    async fn find_shareables(&self, location: &str) -> Result<ShareableMap> {
        let request = self
            .client
            .get(self.url(SERVICES_PATH))
            .query(&[("location", location)]);
        let response = self.send(request).await?;
        let items: Vec<LocatedServiceItem> = self.read_items(response).await?;

        // Last write wins on duplicate component types
        let mut shareables = ShareableMap::new();
        for service in items {
            for component in service.components {
                if component.shareable == 1 {
                    shareables.insert(component.component_type, component.component_id);
                }
            }
        }
        Ok(shareables)
    }

    async fn add_service(&self, record: ServiceRecord) -> Result<()> {
        let body = ServiceRecordBody {
            type_id: &record.type_id,
            target_id: &record.target_id,
            target_type: &record.target_type,
            location: &record.location,
            deployment_ref: record.deployment_id.as_str(),
        };
        let request = self
            .client
            .put(self.url(&format!(
                "{}/{}",
                SERVICES_PATH,
                record.deployment_id.as_str()
            )))
            .json(&body);
        let response = self.send(request).await?;
        self.expect_success(response).await
    }

    async fn delete_service(&self, deployment_id: &DeploymentId) -> Result<()> {
        let request = self
            .client
            .delete(self.url(&format!("{}/{}", SERVICES_PATH, deployment_id.as_str())));
        let response = self.send(request).await?;
        self.expect_success(response).await
    }

    async fn verify_unique_deployment_id(&self, deployment_id: &DeploymentId) -> Result<()> {
        let request = self
            .client
            .get(self.url(&format!("{}/{}", SERVICES_PATH, deployment_id.as_str())));
        let response = self.send(request).await?;

        match response.status() {
            // An existing record means the id is taken
            s if s.is_success() => Err(RegistryError::Conflict(deployment_id.clone())),
            StatusCode::NOT_FOUND => Ok(()),
            s => Err(api_error(s, response).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn registry(server: &MockServer) -> HttpServiceRegistry {
        HttpServiceRegistry::new(RegistryEndpoint::new(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn find_templates_parses_items() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/service-types"))
            .and(query_param("targetType", "vFW"))
            .and(query_param("serviceLocation", "east"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [
                    {"typeName": "fw-monitor", "blueprintTemplate": "tosca: {{target_name}}"}
                ]
            })))
            .mount(&server)
            .await;

        let templates = registry(&server)
            .find_templates("vFW", "east", None)
            .await
            .unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].type_id, "fw-monitor");
    }

    #[tokio::test]
    async fn not_found_maps_to_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/service-types"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let templates = registry(&server)
            .find_templates("vFW", "east", Some("hint"))
            .await
            .unwrap();
        assert!(templates.is_empty());
    }

    #[tokio::test]
    async fn server_error_preserves_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = registry(&server).find_services("vnf1").await.unwrap_err();
        match err {
            RegistryError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_failure_is_unreachable() {
        // Nothing listens on this port
        let registry =
            HttpServiceRegistry::new(RegistryEndpoint::new("http://127.0.0.1:1")).unwrap();
        let err = registry.find_services("vnf1").await.unwrap_err();
        assert!(matches!(err, RegistryError::Unreachable(_)));
    }

    #[tokio::test]
    async fn shareables_last_write_wins() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services"))
            .and(query_param("location", "east"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [
                    {"components": [
                        {"componentType": "collector", "componentId": "c-1", "shareable": 1},
                        {"componentType": "analyzer", "componentId": "a-1", "shareable": 0}
                    ]},
                    {"components": [
                        {"componentType": "collector", "componentId": "c-2", "shareable": 1}
                    ]}
                ]
            })))
            .mount(&server)
            .await;

        let shareables = registry(&server).find_shareables("east").await.unwrap();
        assert_eq!(shareables.get("collector"), Some(&"c-2".to_string()));
        // Non-shareable components are excluded
        assert!(!shareables.contains_key("analyzer"));
    }

    #[tokio::test]
    async fn verify_unique_conflicts_on_existing_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/dep-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "deploymentRef": "dep-1"
            })))
            .mount(&server)
            .await;

        let id = DeploymentId::new("dep-1");
        let err = registry(&server)
            .verify_unique_deployment_id(&id)
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Conflict(_)));
    }

    #[tokio::test]
    async fn verify_unique_passes_on_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/dep-2"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let id = DeploymentId::new("dep-2");
        registry(&server)
            .verify_unique_deployment_id(&id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn add_service_puts_record() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/services/dep-3"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        registry(&server)
            .add_service(ServiceRecord {
                deployment_id: DeploymentId::new("dep-3"),
                type_id: "fw-monitor".into(),
                target_id: "vnf1".into(),
                target_type: "vFW".into(),
                location: "east".into(),
            })
            .await
            .unwrap();
    }
}
