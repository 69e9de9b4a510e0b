//! DTOs for the link listing endpoint.

use serde::Serialize;

use crate::domain::entities::ShortLink;

/// One entry of `GET /api`.
#[derive(Debug, Serialize)]
pub struct LinkItem {
    pub original_url: String,
    pub shortened_url: String,
    pub clicks: i64,
}

impl From<ShortLink> for LinkItem {
    fn from(link: ShortLink) -> Self {
        Self {
            original_url: link.original_url,
            shortened_url: link.shortened_url,
            clicks: link.clicks,
        }
    }
}

/// Body returned when the listing cannot be produced.
#[derive(Debug, Serialize)]
pub struct ListError {
    pub error: &'static str,
}
