//! SQLite implementation of the redirect store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ShortLinkRow {
    original_url: String,
    shortened_url: String,
    clicks: i64,
    created: DateTime<Utc>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(r: ShortLinkRow) -> Self {
        ShortLink::new(r.original_url, r.shortened_url, r.clicks, r.created)
    }
}

/// SQLite repository for short links.
///
/// Uses bound parameters for every statement. Increments are a single
/// `UPDATE ... SET clicks = clicks + 1`, so concurrent redirects never lose a
/// count.
pub struct SqliteLinkRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for SqliteLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO urls (original_url, shortened_url, clicks)
            VALUES (?, ?, 0)
            "#,
        )
        .bind(&new_link.original_url)
        .bind(&new_link.shortened_url)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| {
            let err = AppError::from(e);
            if err.is_conflict() {
                AppError::conflict(
                    "Shortened URL already exists",
                    json!({ "shortened_url": new_link.shortened_url }),
                )
            } else {
                err
            }
        })?;

        Ok(result.rows_affected())
    }

    async fn get(&self, shortened_url: &str) -> Result<ShortLink, AppError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            SELECT original_url, shortened_url, clicks, created
            FROM urls
            WHERE shortened_url = ?
            "#,
        )
        .bind(shortened_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(ShortLink::from).ok_or_else(|| {
            AppError::not_found(
                "Short link not found",
                json!({ "shortened_url": shortened_url }),
            )
        })
    }

    async fn increment_clicks(&self, shortened_url: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE urls SET clicks = clicks + 1 WHERE shortened_url = ?")
            .bind(shortened_url)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "shortened_url": shortened_url }),
            ));
        }

        Ok(())
    }

    async fn latest(&self) -> Result<Vec<ShortLink>, AppError> {
        let rows = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            SELECT original_url, shortened_url, clicks, created
            FROM urls
            ORDER BY created DESC, original_url ASC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(ShortLink::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn total_clicks(&self) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(clicks), 0) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(total)
    }
}
