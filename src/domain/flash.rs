//! One-shot user notices carried between a redirect and the next render.

/// Storage for flash messages.
///
/// A message is written with [`FlashStore::set_once`], which returns an opaque
/// token the web layer hands to the client in a cookie. On the next request the
/// token is passed back to [`FlashStore::read_and_clear`]. A message is
/// produced by at most one successful read.
///
/// # Implementations
///
/// - [`crate::infrastructure::session::SignedCookieFlash`] - message lives in a signed cookie
/// - [`crate::infrastructure::session::InMemoryFlash`] - message lives in process memory
pub trait FlashStore: Send + Sync {
    /// Records `message` under `key` and returns the token identifying it.
    fn set_once(&self, key: &str, message: &str) -> String;

    /// Returns the message behind `token` and forgets it.
    ///
    /// Unknown, tampered or already consumed tokens yield `None`.
    fn read_and_clear(&self, key: &str, token: &str) -> Option<String>;
}
