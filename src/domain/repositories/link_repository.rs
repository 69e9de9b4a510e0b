//! Repository trait for the redirect store.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Persistent mapping of shortened URL to original URL and visit count.
///
/// Every mutation must be a single atomic statement at the storage engine so
/// that concurrent requests for the same code serialize there rather than in
/// application memory.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteLinkRepository`] - SQLite implementation
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - in-process double
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Persists a new mapping with zero clicks and returns the affected row count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the shortened URL already exists.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert(&self, new_link: NewShortLink) -> Result<u64, AppError>;

    /// Looks up a mapping by its shortened URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when nothing matches.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn get(&self, shortened_url: &str) -> Result<ShortLink, AppError>;

    /// Atomically adds one to the click counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no row was affected.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn increment_clicks(&self, shortened_url: &str) -> Result<(), AppError>;

    /// Returns every mapping, newest first, ties broken by original URL ascending.
    ///
    /// An empty store yields an empty vector.
    async fn latest(&self) -> Result<Vec<ShortLink>, AppError>;

    /// Counts stored mappings.
    async fn count(&self) -> Result<i64, AppError>;

    /// Sums the click counters of all mappings.
    async fn total_clicks(&self) -> Result<i64, AppError>;
}
