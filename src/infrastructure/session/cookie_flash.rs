//! Flash messages stored in HMAC-signed cookies.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use rand::Rng;
use rand::distr::Alphanumeric;
use sha2::Sha256;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::flash::FlashStore;

type HmacSha256 = Hmac<Sha256>;

const NONCE_LENGTH: usize = 16;

/// Lifetime of an issued token. Older tokens read as absent.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(10 * 60);

/// Keeps the message inside the token itself.
///
/// Token format:
/// `base64url(message) "." nonce "." hex(issued_at) "." hex(HMAC-SHA256(secret, key NUL nonce NUL issued_at NUL message))`.
///
/// The key is bound into the MAC so a token issued for one key cannot be read
/// under another. Each successful read records the nonce; a replayed token
/// reads as absent. Tokens expire after the max age, which also bounds how
/// long a consumed nonce has to be remembered.
pub struct SignedCookieFlash {
    secret: String,
    max_age_secs: i64,
    /// Consumed nonce -> issue time (Unix seconds).
    consumed: Mutex<HashMap<String, i64>>,
}

impl SignedCookieFlash {
    /// Creates a store signing with `secret`.
    pub fn new(secret: impl Into<String>) -> Self {
        Self::with_max_age(secret, DEFAULT_MAX_AGE)
    }

    /// Creates a store whose tokens expire after `max_age`.
    pub fn with_max_age(secret: impl Into<String>, max_age: Duration) -> Self {
        Self {
            secret: secret.into(),
            max_age_secs: i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX),
            consumed: Mutex::new(HashMap::new()),
        }
    }

    fn mac(&self, key: &str, nonce: &str, issued_at: i64, message: &str) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(key.as_bytes());
        mac.update(&[0]);
        mac.update(nonce.as_bytes());
        mac.update(&[0]);
        mac.update(&issued_at.to_be_bytes());
        mac.update(&[0]);
        mac.update(message.as_bytes());
        mac
    }

    fn issue(&self, key: &str, message: &str, issued_at: i64) -> String {
        let nonce: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(NONCE_LENGTH)
            .map(char::from)
            .collect();

        let signature = hex::encode(
            self.mac(key, &nonce, issued_at, message)
                .finalize()
                .into_bytes(),
        );

        format!(
            "{}.{}.{:x}.{}",
            URL_SAFE_NO_PAD.encode(message),
            nonce,
            issued_at,
            signature
        )
    }

    fn read_at(&self, key: &str, token: &str, now: i64) -> Option<String> {
        let mut parts = token.splitn(4, '.');
        let (payload, nonce, issued_at, signature) =
            (parts.next()?, parts.next()?, parts.next()?, parts.next()?);

        let message = String::from_utf8(URL_SAFE_NO_PAD.decode(payload).ok()?).ok()?;
        let issued_at = i64::from_str_radix(issued_at, 16).ok()?;
        let signature = hex::decode(signature).ok()?;

        if self
            .mac(key, nonce, issued_at, &message)
            .verify_slice(&signature)
            .is_err()
        {
            tracing::warn!(key, "Rejected flash cookie with invalid signature");
            return None;
        }

        if issued_at > now || now - issued_at > self.max_age_secs {
            tracing::debug!(key, issued_at, "Ignoring expired flash cookie");
            return None;
        }

        let mut consumed = self.consumed.lock().unwrap_or_else(|e| e.into_inner());
        consumed.retain(|_, issued| now - *issued <= self.max_age_secs);

        if consumed.contains_key(nonce) {
            tracing::warn!(key, "Ignoring replayed flash cookie");
            return None;
        }
        consumed.insert(nonce.to_string(), issued_at);

        Some(message)
    }
}

impl FlashStore for SignedCookieFlash {
    fn set_once(&self, key: &str, message: &str) -> String {
        self.issue(key, message, Utc::now().timestamp())
    }

    fn read_and_clear(&self, key: &str, token: &str) -> Option<String> {
        self.read_at(key, token, Utc::now().timestamp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn consumed_len(store: &SignedCookieFlash) -> usize {
        store.consumed.lock().unwrap().len()
    }

    #[test]
    fn test_round_trip() {
        let store = SignedCookieFlash::new("this-is-a-test-key");

        let token = store.set_once("error", "The URL was not reachable.");

        assert_eq!(
            store.read_and_clear("error", &token).as_deref(),
            Some("The URL was not reachable.")
        );
    }

    #[test]
    fn test_second_read_is_empty() {
        let store = SignedCookieFlash::new("k");
        let token = store.set_once("error", "Please provide a URL to shorten.");

        assert!(store.read_and_clear("error", &token).is_some());
        assert_eq!(store.read_and_clear("error", &token), None);
    }

    #[test]
    fn test_same_message_twice_gets_distinct_tokens() {
        let store = SignedCookieFlash::new("k");
        let first = store.set_once("error", "same");
        let second = store.set_once("error", "same");

        assert_ne!(first, second);
        assert!(store.read_and_clear("error", &first).is_some());
        assert!(store.read_and_clear("error", &second).is_some());
    }

    #[test]
    fn test_token_is_cookie_safe() {
        let store = SignedCookieFlash::new("k");
        let token = store.set_once("error", "We weren't able to shorten the URL; sorry!");

        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        );
    }

    #[test]
    fn test_expired_token_rejected() {
        let store = SignedCookieFlash::with_max_age("k", Duration::from_secs(60));
        let token = store.issue("error", "old news", 1_000);

        assert_eq!(store.read_at("error", &token, 1_061), None);
        assert_eq!(consumed_len(&store), 0);
    }

    #[test]
    fn test_token_from_the_future_rejected() {
        let store = SignedCookieFlash::new("k");
        let token = store.issue("error", "hello", 2_000);

        assert_eq!(store.read_at("error", &token, 1_000), None);
    }

    #[test]
    fn test_consumed_nonces_are_pruned() {
        let store = SignedCookieFlash::with_max_age("k", Duration::from_secs(60));

        let token = store.issue("error", "a", 1_000);
        assert!(store.read_at("error", &token, 1_010).is_some());
        assert_eq!(consumed_len(&store), 1);

        let later = store.issue("error", "b", 2_000);
        assert!(store.read_at("error", &later, 2_000).is_some());
        assert_eq!(consumed_len(&store), 1);
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let store = SignedCookieFlash::new("k");
        let token = store.set_once("error", "original");
        let (_, rest) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", URL_SAFE_NO_PAD.encode("forged"), rest);

        assert_eq!(store.read_and_clear("error", &forged), None);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = SignedCookieFlash::new("a").set_once("error", "hello");

        assert_eq!(
            SignedCookieFlash::new("b").read_and_clear("error", &token),
            None
        );
    }

    #[test]
    fn test_wrong_key_rejected() {
        let store = SignedCookieFlash::new("k");
        let token = store.set_once("error", "hello");

        assert_eq!(store.read_and_clear("info", &token), None);
        assert_eq!(store.read_and_clear("error", &token).as_deref(), Some("hello"));
    }

    #[test]
    fn test_garbage_rejected() {
        let store = SignedCookieFlash::new("k");

        assert_eq!(store.read_and_clear("error", ""), None);
        assert_eq!(store.read_and_clear("error", "no-dot"), None);
        assert_eq!(store.read_and_clear("error", "!!.zz"), None);
        assert_eq!(store.read_and_clear("error", "aGk.n.zz.00"), None);
    }
}
