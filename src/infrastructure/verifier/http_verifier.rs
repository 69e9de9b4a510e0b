//! Network liveness probe built on `reqwest`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, redirect};
use std::time::Duration;
use tracing::debug;

use crate::domain::verifier::{UrlVerifier, Verification, VerifyError};
use crate::utils::url_validator::validate_url;

const MAX_REDIRECTS: usize = 10;

/// Probes a URL with `HEAD`, retrying once with `GET` when the server refuses
/// `HEAD` (405 or 501).
///
/// Any final 2xx or 3xx status counts as reachable. The client-wide timeout
/// bounds the whole exchange, including redirects.
pub struct HttpVerifier {
    client: Client,
}

impl HttpVerifier {
    /// Builds a verifier whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!("url-shrinker/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    async fn status(&self, url: &str) -> Result<StatusCode, VerifyError> {
        let head = self.client.head(url).send().await.map_err(map_reqwest)?;

        if matches!(
            head.status(),
            StatusCode::METHOD_NOT_ALLOWED | StatusCode::NOT_IMPLEMENTED
        ) {
            debug!(url, status = %head.status(), "HEAD refused, retrying with GET");
            let get = self.client.get(url).send().await.map_err(map_reqwest)?;
            return Ok(get.status());
        }

        Ok(head.status())
    }
}

fn map_reqwest(e: reqwest::Error) -> VerifyError {
    if e.is_timeout() {
        VerifyError::Timeout
    } else {
        VerifyError::Request(e.to_string())
    }
}

#[async_trait]
impl UrlVerifier for HttpVerifier {
    async fn verify(&self, url: &str) -> Result<Verification, VerifyError> {
        let parsed = validate_url(url).map_err(|e| VerifyError::InvalidUrl(e.to_string()))?;

        let status = self.status(parsed.as_str()).await?;
        debug!(url, %status, "Reachability probe finished");

        if status.is_success() || status.is_redirection() {
            Ok(Verification::reachable())
        } else {
            Ok(Verification::unreachable())
        }
    }
}
