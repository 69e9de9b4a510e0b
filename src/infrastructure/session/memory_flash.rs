//! Flash messages kept in process memory.

use rand::Rng;
use rand::distr::Alphanumeric;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::domain::flash::FlashStore;

const TOKEN_LENGTH: usize = 32;

pub const DEFAULT_MAX_PENDING: usize = 10_000;
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

struct Entry {
    key: String,
    message: String,
    created: Instant,
}

/// Server-side flash store.
///
/// The token is a random id and the message is removed on the first read, so
/// a replayed cookie never shows the message twice. Unread messages expire
/// after the TTL, and once `max_pending` messages are waiting the oldest one
/// is dropped to make room.
pub struct InMemoryFlash {
    messages: Mutex<HashMap<String, Entry>>,
    max_pending: usize,
    ttl: Duration,
}

impl Default for InMemoryFlash {
    fn default() -> Self {
        Self::with_limits(DEFAULT_MAX_PENDING, DEFAULT_TTL)
    }
}

impl InMemoryFlash {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(max_pending: usize, ttl: Duration) -> Self {
        Self {
            messages: Mutex::new(HashMap::new()),
            max_pending: max_pending.max(1),
            ttl,
        }
    }

    /// Number of messages written but not yet read.
    pub fn pending(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

impl FlashStore for InMemoryFlash {
    fn set_once(&self, key: &str, message: &str) -> String {
        let token: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect();

        let mut messages = self.messages.lock().unwrap_or_else(|e| e.into_inner());
        messages.retain(|_, entry| entry.created.elapsed() < self.ttl);

        while messages.len() >= self.max_pending {
            let oldest = messages
                .iter()
                .min_by_key(|(_, entry)| entry.created)
                .map(|(token, _)| token.clone());
            match oldest {
                Some(token) => {
                    tracing::debug!("Dropping oldest unread flash message");
                    messages.remove(&token);
                }
                None => break,
            }
        }

        messages.insert(
            token.clone(),
            Entry {
                key: key.to_string(),
                message: message.to_string(),
                created: Instant::now(),
            },
        );

        token
    }

    fn read_and_clear(&self, key: &str, token: &str) -> Option<String> {
        let mut messages = self.messages.lock().unwrap_or_else(|e| e.into_inner());

        match messages.get(token) {
            Some(entry) if entry.key == key => {
                let entry = messages.remove(token)?;
                (entry.created.elapsed() < self.ttl).then_some(entry.message)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_once() {
        let store = InMemoryFlash::new();
        let token = store.set_once("error", "Please provide a URL to shorten.");
        assert_eq!(store.pending(), 1);

        assert_eq!(
            store.read_and_clear("error", &token).as_deref(),
            Some("Please provide a URL to shorten.")
        );
        assert_eq!(store.read_and_clear("error", &token), None);
        assert_eq!(store.pending(), 0);
    }

    #[test]
    fn test_key_mismatch_keeps_message() {
        let store = InMemoryFlash::new();
        let token = store.set_once("error", "hello");

        assert_eq!(store.read_and_clear("info", &token), None);
        assert_eq!(store.read_and_clear("error", &token).as_deref(), Some("hello"));
    }

    #[test]
    fn test_unknown_token() {
        let store = InMemoryFlash::new();
        assert_eq!(store.read_and_clear("error", "missing"), None);
    }

    #[test]
    fn test_unread_messages_are_capped() {
        let store = InMemoryFlash::with_limits(2, DEFAULT_TTL);

        let first = store.set_once("error", "one");
        std::thread::sleep(Duration::from_millis(2));
        let second = store.set_once("error", "two");
        std::thread::sleep(Duration::from_millis(2));
        let third = store.set_once("error", "three");

        assert_eq!(store.pending(), 2);
        assert_eq!(store.read_and_clear("error", &first), None);
        assert_eq!(store.read_and_clear("error", &second).as_deref(), Some("two"));
        assert_eq!(store.read_and_clear("error", &third).as_deref(), Some("three"));
    }

    #[test]
    fn test_expired_messages_are_dropped() {
        let store = InMemoryFlash::with_limits(10, Duration::ZERO);

        let token = store.set_once("error", "stale");
        assert_eq!(store.read_and_clear("error", &token), None);

        store.set_once("error", "also stale");
        store.set_once("error", "newest");
        assert_eq!(store.pending(), 1);
    }
}
