//! Server setup and lifecycle management

use crate::api::create_router;
use crate::api::rest::state::AppState;
use crate::config::DaemonConfig;
use crate::error::{DaemonError, DaemonResult};
use nfd_deployment::{DeploymentOrchestrator, EnrichmentPipeline};
use nfd_registry::{HttpServiceRegistry, RegistryEndpoint, ServiceRegistry};
use nfd_types::LocationMap;
use nfd_workflow::{HttpWorkflowBackend, PollerConfig, WorkflowBackend, WorkflowEndpoint};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

/// NFD dispatcher server
pub struct Server {
    config: DaemonConfig,
    state: AppState,
}

impl Server {
    /// Wire up collaborator clients, pipeline, and orchestrator
    pub fn new(config: DaemonConfig) -> DaemonResult<Self> {
        config.validate().map_err(DaemonError::Config)?;

        let registry: Arc<dyn ServiceRegistry> = Arc::new(
            HttpServiceRegistry::new(RegistryEndpoint {
                url: config.registry.url.clone(),
                user: config.registry.user.clone(),
                password: config.registry.password.clone(),
            })
            .map_err(|e| DaemonError::Config(e.to_string()))?,
        );

        let backend: Arc<dyn WorkflowBackend> = Arc::new(
            HttpWorkflowBackend::new(WorkflowEndpoint {
                url: config.workflow.url.clone(),
                user: config.workflow.user.clone(),
                password: config.workflow.password.clone(),
            })
            .map_err(|e| DaemonError::Config(e.to_string()))?,
        );

        let locations = load_locations(config.locations_file.as_deref());
        let poller = PollerConfig {
            interval: Duration::from_secs(config.poller.interval_secs),
            max_attempts: config.poller.max_attempts,
        };

        let pipeline = Arc::new(EnrichmentPipeline::new(registry.clone(), locations));
        let orchestrator = Arc::new(DeploymentOrchestrator::new(backend, registry, poller));
        let state = AppState::new(pipeline, orchestrator);

        Ok(Self { config, state })
    }

    /// Run the server until a shutdown signal arrives
    ///
    /// Shutdown stops accepting new events; launched sequences finish or
    /// are abandoned with the process. They never leave the registry in a
    /// state a retried event cannot repair.
    pub async fn run(self) -> DaemonResult<()> {
        let addr = self.config.server.listen_addr;
        let mut app = create_router(self.state);
        if self.config.server.enable_cors {
            app = app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("NFD dispatcher listening on {}", addr);
        tracing::info!("Registry endpoint: {}", self.config.registry.url);
        tracing::info!("Workflow endpoint: {}", self.config.workflow.url);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DaemonError::Server(e.to_string()))?;

        tracing::info!("NFD dispatcher shutting down");
        Ok(())
    }
}

/// Read the static location table; a missing or unreadable file degrades
/// to an empty table (every location is then rejected at validation)
fn load_locations(path: Option<&str>) -> LocationMap {
    let Some(path) = path else {
        return LocationMap::new();
    };
    match std::fs::read_to_string(path) {
        Ok(contents) => match LocationMap::from_json(&contents) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(path, error = %e, "locations file unparsable, using empty table");
                LocationMap::new()
            }
        },
        Err(e) => {
            tracing::warn!(path, error = %e, "locations file unreadable, using empty table");
            LocationMap::new()
        }
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
