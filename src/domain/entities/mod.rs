//! Core domain entities.
//!
//! - [`ShortLink`] - A persisted mapping from shortened URL to original URL
//! - [`NewShortLink`] - Input for creating a mapping

pub mod short_link;

pub use short_link::{NewShortLink, ShortLink};
