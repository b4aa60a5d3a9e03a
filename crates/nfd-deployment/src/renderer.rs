//! Blueprint template renderer
//!
//! Pure text expansion: a template body plus a context built from the
//! event, the resolved locations, and the shareable-component map. No
//! I/O happens here; every failure is the sender's problem (bad template
//! or missing context variable), never a system fault.

use crate::error::{DispatchError, Result};
use handlebars::Handlebars;
use nfd_types::{Blueprint, DeploymentId, Event, LocationInfo, ShareableMap, Template};

/// Renders blueprint templates against an event context
pub struct BlueprintRenderer {
    registry: Handlebars<'static>,
}

impl BlueprintRenderer {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        // A template referencing a variable the event did not supply is a
        // client error, not an empty substitution
        registry.set_strict_mode(true);
        Self { registry }
    }

    /// Build the rendering context: the full event body with `locations`
    /// and `shareables` alongside
    pub fn context(
        event: &Event,
        locations: &LocationInfo,
        shareables: &ShareableMap,
    ) -> serde_json::Value {
        let mut context = event.to_json();
        if let Some(object) = context.as_object_mut() {
            object.insert(
                "locations".to_string(),
                serde_json::to_value(locations).unwrap_or(serde_json::Value::Null),
            );
            object.insert(
                "shareables".to_string(),
                serde_json::to_value(shareables).unwrap_or(serde_json::Value::Null),
            );
        }
        context
    }

    /// Expand one template body against a context
    pub fn render(&self, template_body: &str, context: &serde_json::Value) -> Result<String> {
        self.registry
            .render_template(template_body, context)
            .map_err(|e| DispatchError::BadRequest(format!("blueprint template error: {e}")))
    }

    /// Expand every template, assigning each blueprint a fresh deployment
    /// id so the ids can be returned before deployment completes
    pub fn render_all(
        &self,
        templates: &[Template],
        context: &serde_json::Value,
    ) -> Result<Vec<Blueprint>> {
        templates
            .iter()
            .map(|template| {
                Ok(Blueprint {
                    type_id: template.type_id.clone(),
                    rendered_body: self.render(&template.template_body, context)?,
                    deployment_id: DeploymentId::generate(),
                })
            })
            .collect()
    }
}

impl Default for BlueprintRenderer {
    fn default() -> Self {
        Self::new()
    }
}
