//! NFD Daemon library
//!
//! Components of the dispatcher daemon:
//! - REST API for the `/events` endpoint
//! - Configuration loading
//! - Server lifecycle management

pub mod api;
pub mod config;
pub mod error;
pub mod server;

pub use config::DaemonConfig;
pub use error::{ApiError, DaemonError};
pub use server::Server;
