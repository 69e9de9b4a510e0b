//! Short link redirection handler.

use axum::{
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;

use crate::state::AppState;
use crate::web::error::WebError;

#[derive(Debug, Deserialize)]
pub struct OpenParams {
    #[serde(default)]
    pub url: String,
}

/// Resolves a short URL, counts the click and redirects.
///
/// # Endpoint
///
/// `GET /open?url={shortened_url}`
///
/// # Response Codes
///
/// - **303 See Other**: Redirect to the original URL
/// - **404 Not Found**: Unknown or missing short URL
/// - **500 Internal Server Error**: Storage failure; the click could not be
///   recorded so no redirect is issued
pub async fn open_handler(
    State(state): State<AppState>,
    Query(params): Query<OpenParams>,
) -> Result<Redirect, WebError> {
    let link = state.link_service.open(&params.url).await?;

    Ok(Redirect::to(&link.original_url))
}
