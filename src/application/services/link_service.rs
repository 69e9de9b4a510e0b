//! Shortening and redirection workflows.

use serde_json::json;
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::domain::verifier::UrlVerifier;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;
use crate::utils::url_validator::{UrlValidationError, validate_url};

/// Attempts made to find an unused token before giving up.
const MAX_ATTEMPTS: usize = 5;

/// Why a submitted URL was turned away.
///
/// Each variant carries the one-shot message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingUrl,
    InvalidUrl,
    Unreachable,
    NotShortened,
}

impl Rejection {
    pub fn message(&self) -> &'static str {
        match self {
            Rejection::MissingUrl => "Please provide a URL to shorten.",
            Rejection::InvalidUrl => "The URL was not valid.",
            Rejection::Unreachable => "The URL was not reachable.",
            Rejection::NotShortened => "We weren't able to shorten the URL.",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Failure of the shortening workflow.
#[derive(Debug, thiserror::Error)]
pub enum ShortenError {
    /// Recoverable; surfaced to the user as a flash message.
    #[error("{0}")]
    Rejected(Rejection),

    /// Unexpected; surfaced as a server error.
    #[error(transparent)]
    Internal(#[from] AppError),
}

/// Service driving the shortening and redirection workflows.
///
/// Collaborators are injected as trait objects so the SQLite store and the
/// network verifier can be swapped for in-memory doubles.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    verifier: Arc<dyn UrlVerifier>,
    generator: fn() -> String,
}

impl LinkService {
    /// Creates a new link service using the default token generator.
    pub fn new(repository: Arc<dyn LinkRepository>, verifier: Arc<dyn UrlVerifier>) -> Self {
        Self {
            repository,
            verifier,
            generator: generate_code,
        }
    }

    /// Replaces the token generator.
    pub fn with_generator(mut self, generator: fn() -> String) -> Self {
        self.generator = generator;
        self
    }

    /// Validates, verifies and stores `original_url` under a fresh short URL.
    ///
    /// # Steps
    ///
    /// 1. Empty input is rejected with [`Rejection::MissingUrl`]
    /// 2. Input that is not an absolute http(s) URL is rejected with [`Rejection::InvalidUrl`]
    /// 3. A failed or negative reachability probe is rejected with [`Rejection::Unreachable`]
    /// 4. The short URL `{scheme}://{token}` is inserted; a conflicting token is
    ///    regenerated up to 5 times
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::Rejected`] for every user-facing failure,
    /// including storage failures ([`Rejection::NotShortened`]).
    /// Returns [`ShortenError::Internal`] if the stored record cannot be read
    /// back after a successful insert.
    pub async fn shorten(&self, original_url: &str) -> Result<ShortLink, ShortenError> {
        let original_url = original_url.trim();

        let parsed = match validate_url(original_url) {
            Ok(url) => url,
            Err(UrlValidationError::Empty) => {
                warn!("Rejected empty URL submission");
                return Err(ShortenError::Rejected(Rejection::MissingUrl));
            }
            Err(e) => {
                warn!(url = original_url, error = %e, "Rejected malformed URL");
                return Err(ShortenError::Rejected(Rejection::InvalidUrl));
            }
        };

        match self.verifier.verify(original_url).await {
            Ok(v) if v.is_reachable => {}
            Ok(_) => {
                warn!(url = original_url, "URL did not answer successfully");
                return Err(ShortenError::Rejected(Rejection::Unreachable));
            }
            Err(e) => {
                warn!(url = original_url, error = %e, "URL verification failed");
                return Err(ShortenError::Rejected(Rejection::Unreachable));
            }
        }

        let scheme = parsed.scheme();
        if scheme.is_empty() {
            return Err(AppError::internal(
                "Verified URL has no scheme",
                json!({ "url": original_url }),
            )
            .into());
        }

        for attempt in 1..=MAX_ATTEMPTS {
            let shortened_url = format!("{}://{}", scheme, (self.generator)());

            match self
                .repository
                .insert(NewShortLink::new(original_url, shortened_url.as_str()))
                .await
            {
                Ok(_) => {
                    info!(
                        original_url,
                        shortened_url = %shortened_url,
                        "Shortened URL and persisted it"
                    );
                    return Ok(self.repository.get(&shortened_url).await?);
                }
                Err(e) if e.is_conflict() => {
                    warn!(attempt, shortened_url = %shortened_url, "Short code collision, regenerating");
                }
                Err(e) => {
                    error!(original_url, error = %e, "Could not persist short link");
                    return Err(ShortenError::Rejected(Rejection::NotShortened));
                }
            }
        }

        error!(
            original_url,
            attempts = MAX_ATTEMPTS,
            "Gave up after repeated short code collisions"
        );
        Err(ShortenError::Rejected(Rejection::NotShortened))
    }

    /// Resolves a short URL and counts the visit.
    ///
    /// The click is recorded before the caller redirects. A failed increment
    /// blocks the redirect.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown or empty short URLs.
    /// Returns [`AppError::Internal`] for lookup storage errors and any
    /// increment failure.
    pub async fn open(&self, shortened_url: &str) -> Result<ShortLink, AppError> {
        if shortened_url.is_empty() {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "shortened_url": shortened_url }),
            ));
        }

        info!(shortened_url, "Attempting to resolve short link");

        let mut link = self.repository.get(shortened_url).await?;

        if let Err(e) = self.repository.increment_clicks(shortened_url).await {
            error!(shortened_url, error = %e, "Failed to record click");
            return Err(AppError::internal(
                "Failed to record click",
                json!({ "shortened_url": shortened_url }),
            ));
        }
        link.clicks += 1;

        info!(shortened_url, target = %link.original_url, "Redirecting");
        Ok(link)
    }

    /// Lists every link, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn latest(&self) -> Result<Vec<ShortLink>, AppError> {
        self.repository.latest().await
    }

    /// Returns `(links, total clicks)`.
    pub async fn totals(&self) -> Result<(i64, i64), AppError> {
        tokio::try_join!(self.repository.count(), self.repository.total_clicks())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use crate::domain::repositories::MockLinkRepository;
    use crate::domain::verifier::{MockUrlVerifier, Verification, VerifyError};
    use crate::infrastructure::persistence::InMemoryLinkRepository;
    use crate::infrastructure::verifier::SyntaxOnlyVerifier;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn reachable_verifier() -> MockUrlVerifier {
        let mut v = MockUrlVerifier::new();
        v.expect_verify()
            .returning(|_| Ok(Verification::reachable()));
        v
    }

    fn service_with(repo: MockLinkRepository, verifier: MockUrlVerifier) -> LinkService {
        LinkService::new(Arc::new(repo), Arc::new(verifier))
    }

    fn create_test_link(original: &str, shortened: &str, clicks: i64) -> ShortLink {
        ShortLink::new(original.to_string(), shortened.to_string(), clicks, Utc::now())
    }

    fn stored_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    /// Answers `get` with the row `insert` would have written.
    fn expect_read_back(repo: &mut MockLinkRepository, original: &'static str) {
        repo.expect_get().returning(move |code| {
            Ok(ShortLink::new(
                original.to_string(),
                code.to_string(),
                0,
                stored_at(),
            ))
        });
    }

    #[tokio::test]
    async fn test_shorten_success() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert()
            .withf(|l| l.original_url == "https://example.com")
            .times(1)
            .returning(|_| Ok(1));
        expect_read_back(&mut repo, "https://example.com");

        let service = service_with(repo, reachable_verifier());

        let link = service.shorten("https://example.com").await.unwrap();

        assert_eq!(link.original_url, "https://example.com");
        assert_eq!(link.clicks, 0);
        let token = link.shortened_url.strip_prefix("https://").unwrap();
        assert_eq!(token.len(), 9);
    }

    #[tokio::test]
    async fn test_shorten_returns_stored_record() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert().times(1).returning(|_| Ok(1));
        repo.expect_get()
            .withf(|code| code.starts_with("https://"))
            .times(1)
            .returning(|code| {
                Ok(ShortLink::new(
                    "https://example.com".to_string(),
                    code.to_string(),
                    0,
                    stored_at(),
                ))
            });

        let service = service_with(repo, reachable_verifier());

        let link = service.shorten("https://example.com").await.unwrap();
        assert_eq!(link.created_at, stored_at());
    }

    #[tokio::test]
    async fn test_shorten_read_back_failure_is_internal() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert().times(1).returning(|_| Ok(1));
        repo.expect_get()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = service_with(repo, reachable_verifier());

        let err = service.shorten("https://example.com").await.unwrap_err();
        assert!(matches!(err, ShortenError::Internal(_)));
    }

    #[tokio::test]
    async fn test_shorten_keeps_http_scheme() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert()
            .withf(|l| l.shortened_url.starts_with("http://"))
            .times(1)
            .returning(|_| Ok(1));
        expect_read_back(&mut repo, "http://osnews.com");

        let service = service_with(repo, reachable_verifier());

        let link = service.shorten("http://osnews.com").await.unwrap();
        assert!(link.shortened_url.starts_with("http://"));
    }

    #[tokio::test]
    async fn test_shorten_empty_url() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert().times(0);
        let mut verifier = MockUrlVerifier::new();
        verifier.expect_verify().times(0);

        let service = service_with(repo, verifier);

        let err = service.shorten("   ").await.unwrap_err();
        assert!(matches!(err, ShortenError::Rejected(Rejection::MissingUrl)));
    }

    #[tokio::test]
    async fn test_shorten_invalid_url() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert().times(0);
        let mut verifier = MockUrlVerifier::new();
        verifier.expect_verify().times(0);

        let service = service_with(repo, verifier);

        let err = service.shorten("not-a-url").await.unwrap_err();
        assert!(matches!(err, ShortenError::Rejected(Rejection::InvalidUrl)));
    }

    #[tokio::test]
    async fn test_shorten_unreachable_url() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert().times(0);
        let mut verifier = MockUrlVerifier::new();
        verifier
            .expect_verify()
            .times(1)
            .returning(|_| Ok(Verification::unreachable()));

        let service = service_with(repo, verifier);

        let err = service.shorten("https://example.com").await.unwrap_err();
        assert!(matches!(err, ShortenError::Rejected(Rejection::Unreachable)));
    }

    #[tokio::test]
    async fn test_shorten_verifier_error_is_unreachable() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert().times(0);
        let mut verifier = MockUrlVerifier::new();
        verifier
            .expect_verify()
            .times(1)
            .returning(|_| Err(VerifyError::Timeout));

        let service = service_with(repo, verifier);

        let err = service.shorten("https://example.com").await.unwrap_err();
        assert!(matches!(err, ShortenError::Rejected(Rejection::Unreachable)));
    }

    #[tokio::test]
    async fn test_shorten_storage_error() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = service_with(repo, reachable_verifier());

        let err = service.shorten("https://example.com").await.unwrap_err();
        assert!(matches!(err, ShortenError::Rejected(Rejection::NotShortened)));
    }

    #[tokio::test]
    async fn test_shorten_retries_on_collision() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let mut repo = MockLinkRepository::new();
        repo.expect_insert().times(3).returning(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(AppError::conflict("Shortened URL already exists", json!({})))
            } else {
                Ok(1)
            }
        });
        expect_read_back(&mut repo, "https://example.com");

        let service = service_with(repo, reachable_verifier());

        assert!(service.shorten("https://example.com").await.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_shorten_gives_up_after_max_attempts() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert()
            .times(MAX_ATTEMPTS)
            .returning(|_| Err(AppError::conflict("Shortened URL already exists", json!({}))));

        let service = service_with(repo, reachable_verifier());

        let err = service.shorten("https://example.com").await.unwrap_err();
        assert!(matches!(err, ShortenError::Rejected(Rejection::NotShortened)));
    }

    #[tokio::test]
    async fn test_collision_never_overwrites() {
        let repo = Arc::new(InMemoryLinkRepository::new());
        let service = LinkService::new(repo.clone(), Arc::new(SyntaxOnlyVerifier))
            .with_generator(|| "SAMETOKEN".to_string());

        service.shorten("https://first.com").await.unwrap();
        let err = service.shorten("https://second.com").await.unwrap_err();

        assert!(matches!(err, ShortenError::Rejected(Rejection::NotShortened)));
        let kept = repo.get("https://SAMETOKEN").await.unwrap();
        assert_eq!(kept.original_url, "https://first.com");
    }

    #[tokio::test]
    async fn test_open_success_increments() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get()
            .withf(|code| code == "https://abc")
            .times(1)
            .returning(|_| Ok(create_test_link("https://example.com", "https://abc", 4)));
        repo.expect_increment_clicks()
            .withf(|code| code == "https://abc")
            .times(1)
            .returning(|_| Ok(()));

        let service = service_with(repo, MockUrlVerifier::new());

        let link = service.open("https://abc").await.unwrap();
        assert_eq!(link.original_url, "https://example.com");
        assert_eq!(link.clicks, 5);
    }

    #[tokio::test]
    async fn test_open_not_found_does_not_increment() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get()
            .times(1)
            .returning(|_| Err(AppError::not_found("Short link not found", json!({}))));
        repo.expect_increment_clicks().times(0);

        let service = service_with(repo, MockUrlVerifier::new());

        let err = service.open("https://unknown").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_open_empty_is_not_found() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get().times(0);

        let service = service_with(repo, MockUrlVerifier::new());

        assert!(service.open("").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_open_increment_failure_is_internal() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get()
            .returning(|_| Ok(create_test_link("https://example.com", "https://abc", 0)));
        repo.expect_increment_clicks()
            .returning(|_| Err(AppError::not_found("Short link not found", json!({}))));

        let service = service_with(repo, MockUrlVerifier::new());

        let err = service.open("https://abc").await.unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_open_lookup_storage_error_is_internal() {
        let mut repo = MockLinkRepository::new();
        repo.expect_get()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));
        repo.expect_increment_clicks().times(0);

        let service = service_with(repo, MockUrlVerifier::new());

        let err = service.open("https://abc").await.unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_totals() {
        let mut repo = MockLinkRepository::new();
        repo.expect_count().returning(|| Ok(3));
        repo.expect_total_clicks().returning(|| Ok(2120));

        let service = service_with(repo, MockUrlVerifier::new());

        assert_eq!(service.totals().await.unwrap(), (3, 2120));
    }
}
