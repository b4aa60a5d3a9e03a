//! Application state for API handlers

use nfd_deployment::{DeploymentOrchestrator, EnrichmentPipeline};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Request enrichment pipeline
    pub pipeline: Arc<EnrichmentPipeline>,

    /// Deployment orchestrator
    pub orchestrator: Arc<DeploymentOrchestrator>,

    /// Daemon version
    pub version: String,

    /// Daemon start time
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        pipeline: Arc<EnrichmentPipeline>,
        orchestrator: Arc<DeploymentOrchestrator>,
    ) -> Self {
        Self {
            pipeline,
            orchestrator,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: chrono::Utc::now(),
        }
    }

    /// Human-readable uptime
    pub fn uptime(&self) -> String {
        let elapsed = chrono::Utc::now() - self.started_at;
        format!("{}s", elapsed.num_seconds().max(0))
    }
}
