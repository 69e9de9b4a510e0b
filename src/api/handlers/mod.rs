//! HTTP request handlers for API endpoints.

pub mod health;
pub mod links;
pub mod ping;

pub use health::health_handler;
pub use links::links_handler;
pub use ping::ping_handler;
