//! Verifier that skips the network probe.

use async_trait::async_trait;

use crate::domain::verifier::{UrlVerifier, Verification, VerifyError};
use crate::utils::url_validator::validate_url;

/// Accepts every syntactically valid `http`/`https` URL.
///
/// Selected when `VERIFY_URLS=false`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SyntaxOnlyVerifier;

#[async_trait]
impl UrlVerifier for SyntaxOnlyVerifier {
    async fn verify(&self, url: &str) -> Result<Verification, VerifyError> {
        validate_url(url).map_err(|e| VerifyError::InvalidUrl(e.to_string()))?;
        Ok(Verification::reachable())
    }
}
