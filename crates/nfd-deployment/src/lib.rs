//! NFD Deployment - Event-to-deployment orchestration
//!
//! The pipeline turns an inbound VNF lifecycle event into a validated,
//! enriched dispatch plan; the orchestrator drives each planned deploy or
//! undeploy sequence end-to-end against the workflow backend and the
//! service registry.
//!
//! ## Eventual consistency
//!
//! The orchestrator returns the generated deployment ids as soon as the
//! per-target sequences are launched. Sequence outcomes are logged, never
//! reported back to the original caller. A sequence that fails partway is
//! not rolled back; the registry entry is only written after a successful
//! install and only removed after a successful uninstall, so a retried
//! event converges on the backend's actual state.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod error;
pub mod orchestrator;
pub mod pipeline;
pub mod renderer;

// Re-exports
pub use error::{DispatchError, Result};
pub use orchestrator::DeploymentOrchestrator;
pub use pipeline::{DispatchPlan, EnrichedRequest, EnrichmentPipeline};
pub use renderer::BlueprintRenderer;
