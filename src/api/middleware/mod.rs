//! HTTP middleware shared by every route.

pub mod tracing;
