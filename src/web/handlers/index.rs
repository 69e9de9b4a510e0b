//! Listing page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    http::{HeaderMap, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse},
};

use crate::domain::entities::ShortLink;
use crate::state::AppState;
use crate::utils::format::format_clicks;
use crate::web::error::WebError;
use crate::web::flash::{self, ERROR_KEY, SHORTENED_KEY, SUBMITTED_KEY};

/// One row of the links table.
pub struct LinkRow {
    pub original_url: String,
    pub shortened_url: String,
    /// Relative link through the redirection workflow.
    pub open_href: String,
    /// Click count with thousands separators.
    pub clicks: String,
}

impl From<ShortLink> for LinkRow {
    fn from(link: ShortLink) -> Self {
        let encoded: String =
            url::form_urlencoded::byte_serialize(link.shortened_url.as_bytes()).collect();

        Self {
            open_href: format!("/open?url={encoded}"),
            clicks: format_clicks(link.clicks),
            original_url: link.original_url,
            shortened_url: link.shortened_url,
        }
    }
}

/// Template for the listing page.
///
/// Renders `templates/index.html` with:
/// - The pending error message, if any
/// - The form, refilled with the last rejected submission
/// - The short URL produced by the last successful submission
/// - Every stored link, newest first
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub error: Option<String>,
    pub original_url: String,
    pub shortened_url: Option<String>,
    pub links: Vec<LinkRow>,
}

/// Renders the listing page.
///
/// # Endpoint
///
/// `GET /`
///
/// # Flash messages
///
/// Pending messages are consumed by this render and their cookies expired,
/// so a reload shows the page without them.
///
/// # Errors
///
/// A storage failure while listing links answers 500.
pub async fn index_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, WebError> {
    let taken = flash::take(
        state.flash.as_ref(),
        &headers,
        &[ERROR_KEY, SUBMITTED_KEY, SHORTENED_KEY],
    );

    let links = state.link_service.latest().await?;

    let template = IndexTemplate {
        error: taken.get(ERROR_KEY),
        original_url: taken.get(SUBMITTED_KEY).unwrap_or_default(),
        shortened_url: taken.get(SHORTENED_KEY),
        links: links.into_iter().map(LinkRow::from).collect(),
    };

    let clear: Vec<_> = taken
        .clear_cookies
        .into_iter()
        .map(|v| (SET_COOKIE, v))
        .collect();

    Ok((AppendHeaders(clear), template))
}
