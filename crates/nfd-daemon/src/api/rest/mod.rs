//! REST API modules

pub mod handlers;
pub mod router;
pub mod state;
