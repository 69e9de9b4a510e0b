//! API route configuration.

use crate::api::handlers::{links_handler, ping_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Public API routes.
///
/// Merged at the root rather than nested, so `/api` itself is a route.
///
/// # Endpoints
///
/// - `GET /api`      - JSON listing of every link
/// - `GET /api/ping` - Current Unix timestamp
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api", get(links_handler))
        .route("/api/ping", get(ping_handler))
}
