//! API request handlers

mod events;
mod info;

pub use events::*;
pub use info::*;
