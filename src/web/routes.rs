//! Web route configuration.

use crate::state::AppState;
use crate::web::handlers::{index_handler, open_handler, shorten_handler};
use axum::{Router, routing::get};

/// Browser-facing routes.
///
/// # Endpoints
///
/// - `GET  /`     - Listing page with the shortening form
/// - `POST /`     - Form submission
/// - `GET  /open` - Redirect through a short URL
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler).post(shorten_handler))
        .route("/open", get(open_handler))
}
