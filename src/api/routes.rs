//! API route configuration.
//!
//! The API is read-only and unauthenticated.

use crate::api::handlers::{domain_status_handler, mappings_handler, status_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All routes nested under `/api`.
///
/// # Endpoints
///
/// - `GET /status`          - Status of every monitored domain
/// - `GET /status/{domain}` - Status of one monitored domain
/// - `GET /mappings`        - Discovered redirect mappings
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(status_handler))
        .route("/status/{domain}", get(domain_status_handler))
        .route("/mappings", get(mappings_handler))
}
