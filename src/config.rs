//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//! A `.env` file in the working directory is honoured (see `main.rs`).
//!
//! ## Required Variables
//!
//! - `SESSION_SECRET` - HMAC key signing flash cookies
//!
//! ## Optional Variables
//!
//! - `DATABASE_URL` - SQLite URL (default: `sqlite://data/database.sqlite3`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `STATIC_DIR` - Static asset directory (default: `static`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `VERIFY_URLS` - Probe submitted URLs over the network (default: `true`)
//! - `VERIFY_TIMEOUT_SECONDS` - Probe timeout (default: 5)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `DB_CONNECT_TIMEOUT` - Pool acquire timeout in seconds (default: 30)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/database.sqlite3";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub static_dir: String,
    pub log_level: String,
    pub log_format: String,
    /// HMAC key for flash cookies. Loaded from `SESSION_SECRET`. Must be non-empty.
    pub session_secret: String,
    /// When false, submitted URLs are only checked for syntax.
    pub verify_urls: bool,
    /// Upper bound for one reachability probe, redirects included.
    pub verify_timeout_seconds: u64,
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 5).
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds
    /// (`DB_CONNECT_TIMEOUT`, default: 30).
    pub db_connect_timeout: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `SESSION_SECRET` is missing.
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let session_secret = env::var("SESSION_SECRET").context("SESSION_SECRET must be set")?;

        let verify_urls = env::var("VERIFY_URLS")
            .map(|v| parse_bool(&v))
            .unwrap_or(true);

        let verify_timeout_seconds = env::var("VERIFY_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let db_connect_timeout = env::var("DB_CONNECT_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            database_url,
            listen_addr,
            static_dir,
            log_level,
            log_format,
            session_secret,
            verify_urls,
            verify_timeout_seconds,
            db_max_connections,
            db_connect_timeout,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `database_url` is not a SQLite URL
    /// - `session_secret` is empty
    /// - a timeout or the pool size is zero
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        if self.session_secret.is_empty() {
            anyhow::bail!("SESSION_SECRET must not be empty");
        }

        if self.verify_timeout_seconds == 0 {
            anyhow::bail!("VERIFY_TIMEOUT_SECONDS must be greater than 0");
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_connect_timeout == 0 {
            anyhow::bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }

        Ok(())
    }

    pub fn verify_timeout(&self) -> Duration {
        Duration::from_secs(self.verify_timeout_seconds)
    }

    pub fn db_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.db_connect_timeout)
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!("  Static assets: {}", self.static_dir);
        if self.verify_urls {
            tracing::info!(
                "  URL verification: enabled ({}s timeout)",
                self.verify_timeout_seconds
            );
        } else {
            tracing::info!("  URL verification: syntax only");
        }
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn parse_bool(v: &str) -> bool {
    v.eq_ignore_ascii_case("true") || v == "1" || v.eq_ignore_ascii_case("yes")
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
