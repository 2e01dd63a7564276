//! Handlers for domain status reporting.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::status::{DomainStatusDto, StatusResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the current state of every monitored domain.
///
/// # Endpoint
///
/// `GET /api/status`
///
/// # Response
///
/// Domains appear in monitored-set order: seed list first, then domains
/// discovered through redirects. Domains not probed yet report
/// `"status": "unknown"` and `"lastChecked": "never"`.
///
/// ```json
/// {
///   "domains": {
///     "old.example.com": {
///       "isLive": true,
///       "status": 200,
///       "currentDomain": "new.example.com",
///       "lastChecked": "2024-01-15T10:30:00Z"
///     }
///   }
/// }
/// ```
///
/// # Errors
///
/// Returns 500 Internal Server Error if the snapshot store cannot be read.
pub async fn status_handler(
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, AppError> {
    let report = state.status_service.report().await?;

    Ok(Json(report.into()))
}

/// Returns the current state of a single monitored domain.
///
/// # Endpoint
///
/// `GET /api/status/{domain}`
///
/// # Errors
///
/// Returns 400 Bad Request if `domain` is not a valid hostname.
/// Returns 404 Not Found if the domain is not monitored.
/// Returns 500 Internal Server Error if the snapshot store cannot be read.
pub async fn domain_status_handler(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Json<DomainStatusDto>, AppError> {
    let status = state.status_service.domain_status(&domain).await?;

    Ok(Json(status.into()))
}
