//! URL reachability probes.
//!
//! - [`HttpVerifier`] - HEAD (falling back to GET) over the network with a timeout
//! - [`SyntaxOnlyVerifier`] - accepts any well-formed URL without network access

pub mod http_verifier;
pub mod syntax_only;

pub use http_verifier::HttpVerifier;
pub use syntax_only::SyntaxOnlyVerifier;
