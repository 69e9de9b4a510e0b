//! Short token generation.
//!
//! A token is derived from 32 uniformly drawn alphanumeric characters, salted
//! with the current time, hashed with SHA-256 and encoded as URL-safe base64.
//! Only the first [`TOKEN_LENGTH`] characters are kept.
//!
//! Uniqueness is probabilistic. The store rejects duplicates and
//! [`crate::application::services::LinkService`] regenerates on conflict.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distr::Alphanumeric;
use sha2::{Digest, Sha256};

/// Number of random alphanumeric characters fed into the digest.
const SOURCE_LENGTH: usize = 32;

/// Length of the generated token.
pub const TOKEN_LENGTH: usize = 9;

/// Generates a short, URL-safe token.
///
/// The format is fixed (9 characters of `[A-Za-z0-9_-]`), the value is not
/// predictable.
///
/// # Examples
///
/// ```ignore
/// let token = generate_code();
/// assert_eq!(token.len(), 9);
/// ```
pub fn generate_code() -> String {
    let salted = uniqid(&random_source(), Utc::now());
    let digest = Sha256::digest(salted.as_bytes());

    let mut token = URL_SAFE_NO_PAD.encode(digest);
    token.truncate(TOKEN_LENGTH);
    token
}

/// Draws [`SOURCE_LENGTH`] characters from `[a-zA-Z0-9]`.
///
/// `Alphanumeric` samples by rejection, so no index is favoured. The thread
/// RNG is a CSPRNG seeded from the operating system.
fn random_source() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SOURCE_LENGTH)
        .map(char::from)
        .collect()
}

/// Appends the epoch seconds (8 hex digits) and the sub-second microseconds
/// masked to 20 bits (5 hex digits) to `prefix`.
fn uniqid(prefix: &str, now: DateTime<Utc>) -> String {
    let secs = now.timestamp();
    let micros = now.timestamp_subsec_micros() & 0xF_FFFF;

    format!("{prefix}{secs:08x}{micros:05x}")
}
