//! Reachability verification of submitted URLs.

use async_trait::async_trait;
use thiserror::Error;

/// Outcome of a liveness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verification {
    pub is_reachable: bool,
}

impl Verification {
    pub fn reachable() -> Self {
        Self { is_reachable: true }
    }

    pub fn unreachable() -> Self {
        Self {
            is_reachable: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("probe timed out")]
    Timeout,

    #[error("probe failed: {0}")]
    Request(String),
}

/// Probes whether a URL answers successfully.
///
/// Implementations must bound their own latency. Callers treat any error the
/// same as an unreachable verdict.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlVerifier: Send + Sync {
    async fn verify(&self, url: &str) -> Result<Verification, VerifyError>;
}
