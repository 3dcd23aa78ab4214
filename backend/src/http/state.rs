//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::db::repository::DatasetRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Dataset store
    pub repository: Arc<dyn DatasetRepository>,
    /// Request defaults (top-N, reference prefix, sentinel locations)
    pub config: Arc<EngineConfig>,
}

impl AppState {
    pub fn new(repository: Arc<dyn DatasetRepository>, config: EngineConfig) -> Self {
        Self {
            repository,
            config: Arc::new(config),
        }
    }
}
