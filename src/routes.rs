//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /`            - Listing page (web)
//! - `POST /`            - Shorten form submission (web)
//! - `GET  /open?url=`   - Short link redirect (web)
//! - `GET  /api`         - JSON listing
//! - `GET  /api/ping`    - Unix timestamp
//! - `GET  /health`      - Health check
//! - `/static/*`         - Static assets
//! - anything else       - 404 page
//!
//! Trailing slash normalization wraps this router in [`crate::server`], since
//! a path rewrite has to run before routing.

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use crate::web;
use crate::web::handlers::not_found_handler;
use axum::Router;
use axum::routing::get;
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `static_dir` - directory served under `/static`
pub fn app_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .merge(web::routes::routes())
        .merge(api::routes::routes())
        .route("/health", get(health_handler))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found_handler)
        .with_state(state)
        .layer(tracing::layer())
}
