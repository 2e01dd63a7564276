//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod mappings;
pub mod status;

pub use health::health_handler;
pub use mappings::mappings_handler;
pub use status::{domain_status_handler, status_handler};
