//! NFD Registry - Service registry client
//!
//! The registry is the external catalog of service types (blueprint
//! templates) and deployed services. This crate provides:
//!
//! - **ServiceRegistry**: the narrow operation set NFD uses
//! - **HttpServiceRegistry**: reqwest-based client for the real registry
//! - **InMemoryServiceRegistry**: in-memory implementation for tests
//!
//! The registry is the source of truth; nothing is cached locally.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod client;
pub mod error;
pub mod http;
pub mod memory;

// Re-exports
pub use client::ServiceRegistry;
pub use error::{RegistryError, Result};
pub use http::{HttpServiceRegistry, RegistryEndpoint};
pub use memory::InMemoryServiceRegistry;
