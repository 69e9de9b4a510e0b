//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, collaborator wiring and the Axum server
//! lifecycle.

use crate::application::services::LinkService;
use crate::config::Config;
use crate::domain::verifier::UrlVerifier;
use crate::infrastructure::persistence::{SqliteLinkRepository, connect, run_migrations};
use crate::infrastructure::session::SignedCookieFlash;
use crate::infrastructure::verifier::{HttpVerifier, SyntaxOnlyVerifier};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool
/// - Apply migrations
/// - Reachability verifier (network probe or syntax only)
/// - Signed cookie flash store
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The HTTP client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect(
        &config.database_url,
        config.db_max_connections,
        config.db_connect_timeout(),
    )
    .await
    .with_context(|| format!("Failed to open database {}", config.database_url))?;
    tracing::info!("Connected to database");

    run_migrations(&pool)
        .await
        .context("Failed to migrate")?;

    let verifier: Arc<dyn UrlVerifier> = if config.verify_urls {
        let http = HttpVerifier::new(config.verify_timeout())
            .context("Failed to build HTTP client for URL verification")?;
        tracing::info!("URL verification enabled");
        Arc::new(http)
    } else {
        tracing::info!("URL verification disabled (syntax only)");
        Arc::new(SyntaxOnlyVerifier)
    };

    let link_repository = Arc::new(SqliteLinkRepository::new(Arc::new(pool)));
    let link_service = Arc::new(LinkService::new(link_repository, verifier));
    let flash = Arc::new(SignedCookieFlash::new(config.session_secret.clone()));

    let state = AppState::new(link_service, flash);

    let app = NormalizePathLayer::trim_trailing_slash()
        .layer(app_router(state, &config.static_dir));

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
