//! Syntax validation for submitted URLs.

use url::Url;

/// Reasons a submitted string is not an acceptable absolute URL.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL is empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,
}

/// Parses `input` as an absolute `http`/`https` URL with a host.
///
/// Surrounding whitespace is ignored. Schemes such as `javascript:`, `data:`
/// or `file:` are rejected.
///
/// # Errors
///
/// See [`UrlValidationError`].
pub fn validate_url(input: &str) -> Result<Url, UrlValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlValidationError::MissingHost),
    }
}
