//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the domain contracts.
//!
//! # Modules
//!
//! - [`persistence`] - SQLite and in-memory redirect stores
//! - [`session`] - Flash message stores (signed cookie, in-memory)
//! - [`verifier`] - URL reachability probes

pub mod persistence;
pub mod session;
pub mod verifier;
