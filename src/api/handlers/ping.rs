//! Liveness ping.

use chrono::Utc;

/// Returns the current Unix timestamp as `text/plain`.
///
/// # Endpoint
///
/// `GET /api/ping`
pub async fn ping_handler() -> String {
    Utc::now().timestamp().to_string()
}
