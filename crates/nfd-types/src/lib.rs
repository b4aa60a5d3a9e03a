//! NFD Types - Core types for event-driven service deployment
//!
//! NFD (Network Function Dispatcher) reacts to lifecycle events for
//! virtual network functions and keeps a service registry consistent
//! with the workflow-execution backend that actually runs the services.
//!
//! ## Key Concepts
//!
//! - **Event**: An inbound VNF lifecycle event asking for a deploy or undeploy
//! - **Template**: An unexpanded blueprint associated with a service type
//! - **Blueprint**: A rendered template, ready for upload to the backend
//! - **ServiceRecord**: The registry's view of one deployed service
//! - **WorkflowExecution**: Status of an asynchronous backend workflow

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod event;
pub mod ids;
pub mod location;
pub mod service;
pub mod workflow;

// Re-export main types
pub use event::{Event, ServiceAction};
pub use ids::{DeploymentId, RequestId};
pub use location::{LocationEntry, LocationInfo, LocationMap};
pub use service::{Blueprint, DeployedService, ServiceRecord, ShareableMap, Template};
pub use workflow::{WorkflowExecution, WorkflowStatus};
