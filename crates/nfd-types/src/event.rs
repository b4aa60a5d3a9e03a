//! Inbound VNF lifecycle events

use serde::{Deserialize, Serialize};
use std::fmt;

/// Requested lifecycle action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceAction {
    /// Deploy services for the target
    Deploy,
    /// Undeploy services previously deployed for the target
    Undeploy,
}

impl fmt::Display for ServiceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceAction::Deploy => write!(f, "deploy"),
            ServiceAction::Undeploy => write!(f, "undeploy"),
        }
    }
}

/// A VNF lifecycle event
///
/// Immutable input to the enrichment pipeline. The full original JSON body
/// is kept alongside the parsed fields because blueprint templates may
/// reference any field the sender included, not only the required ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Target identifier (e.g. the VNF name)
    #[serde(default)]
    pub target_name: String,

    /// Target type (e.g. "vFW")
    #[serde(default)]
    pub target_type: String,

    /// Requested action
    pub service_action: ServiceAction,

    /// Location the target runs at
    #[serde(default)]
    pub service_location: String,

    /// Optional service-type hint narrowing the template lookup
    #[serde(default)]
    pub service_type: Option<String>,

    /// Every field the sender included, for template rendering
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Event {
    /// Names of required fields that are missing or empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.target_name.is_empty() {
            missing.push("target_name");
        }
        if self.target_type.is_empty() {
            missing.push("target_type");
        }
        if self.service_location.is_empty() {
            missing.push("service_location");
        }
        missing
    }

    /// The full event body as a JSON object, for template context building
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
