//! Browser-facing HTML layer.
//!
//! Server-side rendered with Askama. User-facing failures of the shortening
//! workflow travel to the next page render as flash messages.
//!
//! # Modules
//!
//! - [`handlers`] - Listing, form submission, redirection and 404 handlers
//! - [`flash`] - Cookie plumbing around [`crate::domain::flash::FlashStore`]
//! - [`error`] - HTML error responses
//! - [`routes`] - Web route configuration

pub mod error;
pub mod flash;
pub mod handlers;
pub mod routes;
