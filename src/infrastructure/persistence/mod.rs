//! Redirect store implementations.
//!
//! # Repositories
//!
//! - [`SqliteLinkRepository`] - SQLx-backed store used in production
//! - [`InMemoryLinkRepository`] - process-local store for tests and tooling
//!
//! [`pool`] owns connection setup and embedded migrations.

pub mod memory_link_repository;
pub mod pool;
pub mod sqlite_link_repository;

pub use memory_link_repository::InMemoryLinkRepository;
pub use pool::{connect, run_migrations};
pub use sqlite_link_repository::SqliteLinkRepository;
