//! Flash cookie plumbing.
//!
//! Each flash key gets its own cookie, `flash_<key>`. Setting a message emits
//! a session cookie holding the store's token. Reading consumes the message
//! through [`FlashStore::read_and_clear`] and expires the cookie in the same
//! response, so the message survives exactly one render.

use axum::http::{HeaderMap, HeaderValue, header::COOKIE};
use tracing::warn;

use crate::domain::flash::FlashStore;

/// Error message from a rejected submission.
pub const ERROR_KEY: &str = "error";
/// The URL the user submitted, used to refill the form after a rejection.
pub const SUBMITTED_KEY: &str = "submitted";
/// The short URL created by the last successful submission.
pub const SHORTENED_KEY: &str = "shortened";

fn cookie_name(key: &str) -> String {
    format!("flash_{key}")
}

/// Finds the value of cookie `name` in the request's `Cookie` headers.
fn find_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|s| s.split(';'))
        .find_map(|cookie| {
            let mut parts = cookie.trim().splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(n), Some(value)) if n == name && !value.is_empty() => {
                    Some(value.to_string())
                }
                _ => None,
            }
        })
}

fn to_header(cookie: String) -> Option<HeaderValue> {
    match HeaderValue::from_str(&cookie) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(error = %e, "Dropping unencodable flash cookie");
            None
        }
    }
}

/// Builds the `Set-Cookie` value recording `message` under `key`.
pub fn set_cookie(store: &dyn FlashStore, key: &str, message: &str) -> Option<HeaderValue> {
    let token = store.set_once(key, message);
    to_header(format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        cookie_name(key),
        token
    ))
}

/// Builds the `Set-Cookie` value expiring the cookie for `key`.
pub fn clear_cookie(key: &str) -> Option<HeaderValue> {
    to_header(format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        cookie_name(key)
    ))
}

/// Messages read from a request, plus the headers that clear them.
#[derive(Debug, Default)]
pub struct TakenFlash {
    pub messages: Vec<(&'static str, String)>,
    pub clear_cookies: Vec<HeaderValue>,
}

impl TakenFlash {
    pub fn get(&self, key: &str) -> Option<String> {
        self.messages
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, m)| m.clone())
    }
}

/// Consumes the messages stored under `keys`.
///
/// Every flash cookie present in the request is expired, whether or not its
/// token still resolves to a message.
pub fn take(store: &dyn FlashStore, headers: &HeaderMap, keys: &[&'static str]) -> TakenFlash {
    let mut taken = TakenFlash::default();

    for &key in keys {
        let Some(token) = find_cookie(headers, &cookie_name(key)) else {
            continue;
        };

        if let Some(message) = store.read_and_clear(key, &token) {
            taken.messages.push((key, message));
        }
        taken.clear_cookies.extend(clear_cookie(key));
    }

    taken
}
