//! In-memory implementation of the redirect store.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::sync::RwLock;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Process-local store with the same contract as the SQLite one.
///
/// Mutations run under the write lock, which plays the role of the storage
/// engine's atomic statement.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: RwLock<Vec<ShortLink>>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with existing records, bypassing uniqueness checks.
    pub fn with_links(links: Vec<ShortLink>) -> Self {
        Self {
            links: RwLock::new(links),
        }
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<u64, AppError> {
        let mut links = self.links.write().await;

        if links
            .iter()
            .any(|l| l.shortened_url == new_link.shortened_url)
        {
            return Err(AppError::conflict(
                "Shortened URL already exists",
                json!({ "shortened_url": new_link.shortened_url }),
            ));
        }

        links.push(ShortLink::new(
            new_link.original_url,
            new_link.shortened_url,
            0,
            Utc::now(),
        ));

        Ok(1)
    }

    async fn get(&self, shortened_url: &str) -> Result<ShortLink, AppError> {
        self.links
            .read()
            .await
            .iter()
            .find(|l| l.shortened_url == shortened_url)
            .cloned()
            .ok_or_else(|| {
                AppError::not_found(
                    "Short link not found",
                    json!({ "shortened_url": shortened_url }),
                )
            })
    }

    async fn increment_clicks(&self, shortened_url: &str) -> Result<(), AppError> {
        let mut links = self.links.write().await;

        match links.iter_mut().find(|l| l.shortened_url == shortened_url) {
            Some(link) => {
                link.clicks += 1;
                Ok(())
            }
            None => Err(AppError::not_found(
                "Short link not found",
                json!({ "shortened_url": shortened_url }),
            )),
        }
    }

    async fn latest(&self) -> Result<Vec<ShortLink>, AppError> {
        let mut links = self.links.read().await.clone();

        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.original_url.cmp(&b.original_url))
        });

        Ok(links)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.links.read().await.len() as i64)
    }

    async fn total_clicks(&self) -> Result<i64, AppError> {
        Ok(self.links.read().await.iter().map(|l| l.clicks).sum())
    }
}
