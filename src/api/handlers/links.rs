//! Handler for the JSON link listing.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::api::dto::link::{LinkItem, ListError};
use crate::state::AppState;

/// Lists every stored link, newest first.
///
/// # Endpoint
///
/// `GET /api`
///
/// # Response Codes
///
/// - **200 OK**: JSON array of `{original_url, shortened_url, clicks}`
/// - **204 No Content**: The store is empty
/// - **500 Internal Server Error**: `{"error": "Could not retrieve URL data."}`
pub async fn links_handler(State(state): State<AppState>) -> Response {
    match state.link_service.latest().await {
        Ok(links) if links.is_empty() => StatusCode::NO_CONTENT.into_response(),
        Ok(links) => {
            let items: Vec<LinkItem> = links.into_iter().map(LinkItem::from).collect();
            Json(items).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list links");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ListError {
                    error: "Could not retrieve URL data.",
                }),
            )
                .into_response()
        }
    }
}
