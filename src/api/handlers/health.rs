//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Snapshot store readable
/// - **503 Service Unavailable**: Snapshot store cannot be read
///
/// A failed last cycle is reported as a `warning` on the scheduler check
/// but does not change the response code.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "monitored_domains": 3,
///   "checks": {
///     "snapshot_store": { "status": "ok", "message": "2 snapshots stored" },
///     "scheduler": {
///       "status": "ok",
///       "message": "Last cycle succeeded",
///       "last_cycle": { "probed": 3, "changed": 1, ... }
///     }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_snapshot_store(&state).await;

    let scheduler_check = check_scheduler(&state).await;

    let healthy = !store_check.is_error();

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        monitored_domains: state.status_service.monitored_count().await,
        checks: HealthChecks {
            snapshot_store: store_check,
            scheduler: scheduler_check,
        },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_snapshot_store(state: &AppState) -> CheckStatus {
    match state.status_service.check_store().await {
        Ok(count) => CheckStatus::ok(format!("{count} snapshots stored")),
        Err(e) => CheckStatus::error(format!("Snapshot store error: {e}")),
    }
}

/// Reports the outcome of the most recent cycle.
async fn check_scheduler(state: &AppState) -> CheckStatus {
    match state.monitor.last_cycle().await {
        None => CheckStatus::ok("No cycle completed yet"),
        Some(summary) if summary.succeeded => {
            CheckStatus::ok("Last cycle succeeded").with_last_cycle(summary)
        }
        Some(summary) => {
            let message = format!(
                "Last cycle failed: {}",
                summary.error.as_deref().unwrap_or("unknown error")
            );
            CheckStatus::warning(message).with_last_cycle(summary)
        }
    }
}
