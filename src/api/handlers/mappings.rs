//! Handler for the redirect mapping listing.

use axum::{Json, extract::State};

use crate::api::dto::mappings::MappingsResponse;
use crate::state::AppState;

/// Returns every `original -> current` mapping discovered so far.
///
/// # Endpoint
///
/// `GET /api/mappings`
pub async fn mappings_handler(State(state): State<AppState>) -> Json<MappingsResponse> {
    Json(MappingsResponse(state.status_service.mappings().await))
}
