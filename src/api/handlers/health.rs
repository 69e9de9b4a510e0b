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
/// - **200 OK**: Database reachable
/// - **503 Service Unavailable**: Database check failed
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": {
///       "status": "ok",
///       "message": "Connected, 12 links, 2120 clicks"
///     }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;
    let healthy = db_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { database: db_check },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks database connectivity by reading the link totals.
async fn check_database(state: &AppState) -> CheckStatus {
    match state.link_service.totals().await {
        Ok((links, clicks)) => CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("Connected, {links} links, {clicks} clicks")),
        },
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unavailable");
            CheckStatus {
                status: "error".to_string(),
                message: Some("Database unavailable".to_string()),
            }
        }
    }
}
