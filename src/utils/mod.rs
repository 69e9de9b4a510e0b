//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Short token generation
//! - [`url_validator`] - Absolute URL syntax checks
//! - [`format`] - Template formatting helpers

pub mod code_generator;
pub mod format;
pub mod url_validator;
