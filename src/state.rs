use std::sync::Arc;

use crate::services::ProjectStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProjectStore>,
    pub write_key_sha256: Option<String>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProjectStore>, write_key_sha256: Option<String>) -> Self {
        Self {
            store,
            write_key_sha256,
        }
    }
}
