//! Flash message stores.
//!
//! - [`SignedCookieFlash`] - stateless, the message travels in an HMAC-signed cookie
//! - [`InMemoryFlash`] - the cookie only carries a random id

pub mod cookie_flash;
pub mod memory_flash;

pub use cookie_flash::SignedCookieFlash;
pub use memory_flash::InMemoryFlash;
