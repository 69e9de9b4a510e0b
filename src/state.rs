//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::flash::FlashStore;

/// Handler state. Cheap to clone; every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub flash: Arc<dyn FlashStore>,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService>, flash: Arc<dyn FlashStore>) -> Self {
        Self {
            link_service,
            flash,
        }
    }
}
