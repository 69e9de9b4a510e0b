//! Repository trait definitions for the domain layer.
//!
//! Implementations live in `crate::infrastructure::persistence`: a SQLite
//! adapter for production and an in-memory double for tests. A `mockall`
//! mock is generated under `cfg(test)`.

pub mod link_repository;

pub use link_repository::LinkRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
