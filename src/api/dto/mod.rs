//! Response bodies for the API endpoints.

pub mod health;
pub mod link;
