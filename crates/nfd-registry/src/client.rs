//! Service registry trait

use crate::error::Result;
use async_trait::async_trait;
use nfd_types::{DeployedService, DeploymentId, ServiceRecord, ShareableMap, Template};

/// The operation set NFD needs from the service registry
///
/// All operations are pure request/response. Lookups that match nothing
/// return empty collections, not errors; a registry "not found" is a
/// normal answer for them.
#[async_trait]
pub trait ServiceRegistry: Send + Sync {
    /// Templates applicable to a target type at a location, optionally
    /// narrowed by a service-type hint
    async fn find_templates(
        &self,
        target_type: &str,
        location: &str,
        service_type: Option<&str>,
    ) -> Result<Vec<Template>>;

    /// Services currently deployed for a target
    async fn find_services(&self, target_id: &str) -> Result<Vec<DeployedService>>;

    /// Shareable components at a location, one identifier per component
    /// type (last write wins on duplicates)
    async fn find_shareables(&self, location: &str) -> Result<ShareableMap>;

    /// Record a newly deployed service
    async fn add_service(&self, record: ServiceRecord) -> Result<()>;

    /// Remove the record for an undeployed service
    async fn delete_service(&self, deployment_id: &DeploymentId) -> Result<()>;

    /// Fail with `RegistryError::Conflict` if `deployment_id` is already
    /// registered
    async fn verify_unique_deployment_id(&self, deployment_id: &DeploymentId) -> Result<()>;
}
