//! HTTP request handlers for the browser pages.

pub mod index;
pub mod not_found;
pub mod open;
pub mod shorten;

pub use index::index_handler;
pub use not_found::not_found_handler;
pub use open::open_handler;
pub use shorten::shorten_handler;
