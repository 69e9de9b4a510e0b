//! Domain layer containing business entities and collaborator contracts.
//!
//! Nothing here depends on the database, the HTTP server or the cookie format.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Redirect store contract
//! - [`flash`] - One-shot user notice contract
//! - [`verifier`] - URL reachability contract
//!
//! # Flows
//!
//! Shortening: form input -> [`crate::application::services::LinkService::shorten`]
//! -> code generator -> [`repositories::LinkRepository::insert`].
//!
//! Redirection: `/open?url=` -> [`repositories::LinkRepository::get`]
//! -> [`repositories::LinkRepository::increment_clicks`] -> 303 redirect.

pub mod entities;
pub mod flash;
pub mod repositories;
pub mod verifier;
