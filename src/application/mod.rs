//! Application layer services implementing the workflows.
//!
//! - [`services::link_service::LinkService`] - shortening and redirection

pub mod services;
