//! Short link entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A shortened URL together with its visit counter.
///
/// Immutable after creation except for `clicks`, which only ever grows by one
/// per successful redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortLink {
    pub original_url: String,
    pub shortened_url: String,
    pub clicks: i64,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    pub fn new(
        original_url: String,
        shortened_url: String,
        clicks: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            original_url,
            shortened_url,
            clicks,
            created_at,
        }
    }
}

/// Input data for creating a new link. Clicks always start at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub original_url: String,
    pub shortened_url: String,
}

impl NewShortLink {
    pub fn new(original_url: impl Into<String>, shortened_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            shortened_url: shortened_url.into(),
        }
    }
}
