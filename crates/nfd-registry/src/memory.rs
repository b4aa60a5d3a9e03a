//! In-memory registry implementation
//!
//! Suitable for tests and development. Mirrors the HTTP registry's
//! semantics, including last-write-wins shareable folding.

use crate::client::ServiceRegistry;
use crate::error::{RegistryError, Result};
use async_trait::async_trait;
use nfd_types::{DeployedService, DeploymentId, ServiceRecord, ShareableMap, Template};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// A template entry together with its lookup key
#[derive(Debug, Clone)]
struct TemplateEntry {
    target_type: String,
    location: String,
    service_type: Option<String>,
    template: Template,
}

/// In-memory service registry
#[derive(Default)]
pub struct InMemoryServiceRegistry {
    templates: RwLock<Vec<TemplateEntry>>,
    services: RwLock<HashMap<DeploymentId, ServiceRecord>>,
    shareables: RwLock<HashMap<String, Vec<(String, String)>>>,
    lookups: AtomicU64,
}

impl InMemoryServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a template for a target type / location (/ optional hint)
    pub fn put_template(
        &self,
        target_type: &str,
        location: &str,
        service_type: Option<&str>,
        template: Template,
    ) {
        self.templates
            .write()
            .expect("template lock")
            .push(TemplateEntry {
                target_type: target_type.to_string(),
                location: location.to_string(),
                service_type: service_type.map(str::to_string),
                template,
            });
    }

    /// Seed a deployed service record
    pub fn put_service(&self, record: ServiceRecord) {
        self.services
            .write()
            .expect("service lock")
            .insert(record.deployment_id.clone(), record);
    }

    /// Seed a shareable component at a location (insertion order preserved)
    pub fn put_shareable(&self, location: &str, component_type: &str, component_id: &str) {
        self.shareables
            .write()
            .expect("shareable lock")
            .entry(location.to_string())
            .or_default()
            .push((component_type.to_string(), component_id.to_string()));
    }

    /// Number of lookup operations served so far
    pub fn lookup_count(&self) -> u64 {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Current record for a deployment id, if any
    pub fn service(&self, deployment_id: &DeploymentId) -> Option<ServiceRecord> {
        self.services
            .read()
            .expect("service lock")
            .get(deployment_id)
            .cloned()
    }

    pub fn service_count(&self) -> usize {
        self.services.read().expect("service lock").len()
    }
}

#[async_trait]
impl ServiceRegistry for InMemoryServiceRegistry {
    async fn find_templates(
        &self,
        target_type: &str,
        location: &str,
        service_type: Option<&str>,
    ) -> Result<Vec<Template>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let templates = self.templates.read().expect("template lock");
        Ok(templates
            .iter()
            .filter(|e| {
                e.target_type == target_type
                    && e.location == location
                    && (e.service_type.is_none() || e.service_type.as_deref() == service_type)
            })
            .map(|e| e.template.clone())
            .collect())
    }

    async fn find_services(&self, target_id: &str) -> Result<Vec<DeployedService>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let services = self.services.read().expect("service lock");
        Ok(services
            .values()
            .filter(|r| r.target_id == target_id)
            .map(|r| DeployedService {
                type_id: r.type_id.clone(),
                deployment_id: r.deployment_id.clone(),
            })
            .collect())
    }

    async fn find_shareables(&self, location: &str) -> Result<ShareableMap> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let shareables = self.shareables.read().expect("shareable lock");
        let mut map = ShareableMap::new();
        if let Some(components) = shareables.get(location) {
            for (component_type, component_id) in components {
                map.insert(component_type.clone(), component_id.clone());
            }
        }
        Ok(map)
    }

    async fn add_service(&self, record: ServiceRecord) -> Result<()> {
        self.services
            .write()
            .expect("service lock")
            .insert(record.deployment_id.clone(), record);
        Ok(())
    }

    async fn delete_service(&self, deployment_id: &DeploymentId) -> Result<()> {
        self.services
            .write()
            .expect("service lock")
            .remove(deployment_id);
        Ok(())
    }

    async fn verify_unique_deployment_id(&self, deployment_id: &DeploymentId) -> Result<()> {
        let services = self.services.read().expect("service lock");
        if services.contains_key(deployment_id) {
            Err(RegistryError::Conflict(deployment_id.clone()))
        } else {
            Ok(())
        }
    }
}
