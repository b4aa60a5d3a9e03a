//! Templates, blueprints, and service records

use crate::ids::DeploymentId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from shareable component type to a single component identifier
///
/// Scoped to one location. At most one identifier per component type; when
/// the registry reports duplicates the last one observed wins, because
/// downstream templates expect exactly one identifier per type.
pub type ShareableMap = BTreeMap<String, String>;

/// A service type and its unexpanded blueprint text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    /// Service type this template belongs to
    pub type_id: String,
    /// Unexpanded blueprint text
    pub template_body: String,
}

/// A template rendered against an event context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blueprint {
    /// Service type the blueprint was rendered from
    pub type_id: String,
    /// Deployable blueprint text
    pub rendered_body: String,
    /// Generated at render time so it can be returned to the caller
    /// before deployment completes
    pub deployment_id: DeploymentId,
}

/// The registry's representation of one deployed service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// Globally unique record key
    pub deployment_id: DeploymentId,
    /// Service type of the deployed service
    pub type_id: String,
    /// Target (VNF) the service was deployed for
    pub target_id: String,
    /// Type of the target
    pub target_type: String,
    /// Location the service runs at
    pub location: String,
}

/// A deployed service as returned by an undeploy lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedService {
    /// Service type of the deployed service
    pub type_id: String,
    /// Deployment id to run the uninstall workflow against
    pub deployment_id: DeploymentId,
}
