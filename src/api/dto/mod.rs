//! Data Transfer Objects for API responses.
//!
//! All DTOs serialize with Serde. Domain types are converted at the handler
//! boundary so the wire format can differ from the stored snapshot format.

pub mod health;
pub mod mappings;
pub mod status;
