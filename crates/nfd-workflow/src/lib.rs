//! NFD Workflow - Workflow-execution backend client
//!
//! The backend runs install/uninstall workflows asynchronously. This crate
//! provides:
//!
//! - **WorkflowBackend**: the operation set NFD uses (upload blueprint,
//!   create deployment, start workflow, read execution status)
//! - **HttpWorkflowBackend**: reqwest-based client for the real backend
//! - **poll_to_completion**: bounded poller that waits for an execution
//!   to reach a terminal state
//!
//! Each backend operation is a single outbound call with no internal
//! retry; only the poller repeats its status check, within a fixed
//! attempt budget.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod client;
pub mod error;
pub mod http;
pub mod package;
pub mod poller;

// Re-exports
pub use client::{WorkflowBackend, INSTALL_WORKFLOW, UNINSTALL_WORKFLOW};
pub use error::{Result, WorkflowError};
pub use http::{HttpWorkflowBackend, WorkflowEndpoint};
pub use poller::{poll_to_completion, PollerConfig};
