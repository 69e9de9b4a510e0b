//! Form submission handler.

use axum::{
    Form,
    extract::State,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::info;

use crate::application::services::ShortenError;
use crate::state::AppState;
use crate::web::error::WebError;
use crate::web::flash::{self, ERROR_KEY, SHORTENED_KEY, SUBMITTED_KEY};

#[derive(Debug, Deserialize)]
pub struct ShortenForm {
    #[serde(default)]
    pub url: String,
}

/// Runs the shortening workflow for the submitted form.
///
/// # Endpoint
///
/// `POST /` (`application/x-www-form-urlencoded`, field `url`)
///
/// # Response
///
/// Always `303 See Other` to `/`. A rejection leaves the error message and the
/// submitted URL as flash messages; success leaves the new short URL.
///
/// # Errors
///
/// Only unexpected internal failures escape as 500.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Form(form): Form<ShortenForm>,
) -> Result<Response, WebError> {
    let store = state.flash.as_ref();

    let cookies: Vec<_> = match state.link_service.shorten(&form.url).await {
        Ok(link) => {
            info!(shortened_url = %link.shortened_url, "Short link created");
            flash::set_cookie(store, SHORTENED_KEY, &link.shortened_url)
                .into_iter()
                .collect()
        }
        Err(ShortenError::Rejected(rejection)) => {
            let mut cookies: Vec<_> = flash::set_cookie(store, ERROR_KEY, rejection.message())
                .into_iter()
                .collect();
            if !form.url.trim().is_empty() {
                cookies.extend(flash::set_cookie(store, SUBMITTED_KEY, form.url.trim()));
            }
            cookies
        }
        Err(ShortenError::Internal(e)) => return Err(WebError(e)),
    };

    let headers: Vec<_> = cookies.into_iter().map(|v| (SET_COOKIE, v)).collect();

    Ok((AppendHeaders(headers), Redirect::to("/")).into_response())
}
