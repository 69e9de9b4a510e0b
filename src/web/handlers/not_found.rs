//! Fallback page for unknown routes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{http::StatusCode, response::IntoResponse};

/// Renders `templates/404.html`.
#[derive(Template, WebTemplate)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {}

/// Answers every unmatched route with the 404 page.
pub async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, NotFoundTemplate {})
}
