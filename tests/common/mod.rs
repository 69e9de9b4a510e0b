#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use sqlx::SqlitePool;
use std::sync::Arc;
use url_shrinker::application::services::LinkService;
use url_shrinker::infrastructure::persistence::SqliteLinkRepository;
use url_shrinker::infrastructure::session::SignedCookieFlash;
use url_shrinker::infrastructure::verifier::SyntaxOnlyVerifier;
use url_shrinker::routes::app_router;
use url_shrinker::state::AppState;

pub async fn create_test_link(pool: &SqlitePool, original_url: &str, shortened_url: &str) {
    sqlx::query("INSERT INTO urls (original_url, shortened_url) VALUES (?, ?)")
        .bind(original_url)
        .bind(shortened_url)
        .execute(pool)
        .await
        .unwrap();
}

/// Inserts a link with a fixed creation time and click count.
pub async fn create_link_at(
    pool: &SqlitePool,
    original_url: &str,
    shortened_url: &str,
    clicks: i64,
    created: &str,
) {
    sqlx::query(
        "INSERT INTO urls (original_url, shortened_url, clicks, created) VALUES (?, ?, ?, ?)",
    )
    .bind(original_url)
    .bind(shortened_url)
    .bind(clicks)
    .bind(created)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn clicks_of(pool: &SqlitePool, shortened_url: &str) -> i64 {
    sqlx::query_scalar("SELECT clicks FROM urls WHERE shortened_url = ?")
        .bind(shortened_url)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn link_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// State backed by `pool`, wired like the server but without network probes.
pub fn create_test_state(pool: SqlitePool) -> AppState {
    let link_repo = Arc::new(SqliteLinkRepository::new(Arc::new(pool)));
    let link_service = Arc::new(LinkService::new(link_repo, Arc::new(SyntaxOnlyVerifier)));

    AppState::new(link_service, Arc::new(SignedCookieFlash::new("test-secret")))
}

pub fn test_app(pool: SqlitePool) -> Router {
    app_router(create_test_state(pool), "static")
}

pub fn test_server(pool: SqlitePool) -> TestServer {
    TestServer::new(test_app(pool)).unwrap()
}
