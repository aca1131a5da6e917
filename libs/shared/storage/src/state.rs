use std::sync::Arc;

use shared_config::AppConfig;

use crate::document::DocumentStore;

/// Shared application state handed to every cell router. The single
/// [`DocumentStore`] instance is what makes the per-document mutexes
/// meaningful across concurrent requests.
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<DocumentStore>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let store = Arc::new(DocumentStore::new(config.storage_dir.clone()));
        Self { config, store }
    }
}
