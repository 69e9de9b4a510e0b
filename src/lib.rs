//! # URL Shrinker
//!
//! A small URL shortening service built with Axum and SQLite.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Short link entity and the store, verifier
//!   and flash store traits
//! - **Application Layer** ([`application`]) - Shortening and redirection workflows
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite, HTTP probe, flash stores
//! - **API Layer** ([`api`]) - JSON listing, ping and health
//! - **Web Layer** ([`web`]) - HTML listing page, form and redirects
//!
//! ## Features
//!
//! - Random 9-character short codes derived from a SHA-256 digest
//! - Click counting with single-statement increments
//! - Optional reachability probe before a URL is accepted
//! - One-shot flash messages carried in signed cookies
//!
//! ## Quick Start
//!
//! ```bash
//! export SESSION_SECRET="change-me"
//! export DATABASE_URL="sqlite://data/database.sqlite3"  # Optional
//!
//! cargo run
//! ```
//!
//! Migrations in `migrations/` are embedded and applied at startup.
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LinkService, Rejection, ShortenError};
    pub use crate::domain::entities::{NewShortLink, ShortLink};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
