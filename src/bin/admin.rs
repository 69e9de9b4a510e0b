//! CLI administration tool for url-shrinker.
//!
//! Inspects and edits the link store directly, without going through the
//! HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # List links, newest first
//! cargo run --bin admin -- links
//!
//! # Shorten a URL (syntax check only, no network probe)
//! cargo run --bin admin -- shorten https://example.com --yes
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (optional): SQLite URL, default `sqlite://data/database.sqlite3`

use url_shrinker::application::services::{LinkService, ShortenError};
use url_shrinker::domain::repositories::LinkRepository;
use url_shrinker::infrastructure::persistence::{SqliteLinkRepository, connect, run_migrations};
use url_shrinker::infrastructure::verifier::SyntaxOnlyVerifier;
use url_shrinker::utils::format::format_clicks;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/database.sqlite3";

/// CLI tool for managing url-shrinker.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every short link, newest first
    Links,

    /// Shorten a URL without probing it
    Shorten {
        /// URL to shorten
        url: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    let pool = connect(&database_url, 1, Duration::from_secs(10))
        .await
        .with_context(|| format!("Failed to open database {database_url}"))?;

    run_migrations(&pool)
        .await
        .context("Failed to migrate")?;

    let repo = Arc::new(SqliteLinkRepository::new(Arc::new(pool.clone())));

    match cli.command {
        Commands::Links => list_links(repo).await?,
        Commands::Shorten { url, yes } => shorten(repo, url, yes).await?,
        Commands::Stats => handle_stats(repo).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Lists all links.
///
/// ```text
/// Short links
///
///   Shortened            Clicks   Original
///   ──────────────────────────────────────────────────────
///   https://aB3_x-9Zq     2,120   https://example.com/a
/// ```
async fn list_links(repo: Arc<SqliteLinkRepository>) -> Result<()> {
    println!("{}", "Short links".bright_blue().bold());
    println!();

    let links = repo
        .latest()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin shorten <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<20} {:>8}   {}",
        "Shortened".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Original".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<20} {:>8}   {}",
            link.shortened_url.cyan(),
            format_clicks(link.clicks).bright_green(),
            link.original_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Runs the shortening workflow with a syntax-only check.
///
/// Asks for confirmation unless `--yes` is given.
async fn shorten(repo: Arc<SqliteLinkRepository>, url: String, skip_confirm: bool) -> Result<()> {
    println!("{}", "Shorten URL".bright_blue().bold());
    println!();
    println!("  URL: {}", url.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this short link?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let service = LinkService::new(repo, Arc::new(SyntaxOnlyVerifier));

    match service.shorten(&url).await {
        Ok(link) => {
            println!(
                "{} {}",
                "Created".green().bold(),
                link.shortened_url.bright_yellow().bold()
            );
            println!();
            Ok(())
        }
        Err(ShortenError::Rejected(rejection)) => {
            println!("{}", rejection.message().red());
            anyhow::bail!("URL rejected")
        }
        Err(ShortenError::Internal(e)) => Err(anyhow::anyhow!("Failed to shorten URL: {}", e)),
    }
}

/// Displays link and click totals.
async fn handle_stats(repo: Arc<SqliteLinkRepository>) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let (links, clicks) = tokio::try_join!(repo.count(), repo.total_clicks())
        .map_err(|e| anyhow::anyhow!("Failed to read statistics: {}", e))?;

    println!("  Links:  {}", format_clicks(links).bright_green().bold());
    println!("  Clicks: {}", format_clicks(clicks).bright_green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &SqlitePool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "Database connection OK".green().bold());
            println!("  SQLite: {}", version.bright_white());
        }
    }

    Ok(())
}
