//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::ResultCache;
use crate::sources::SampleSource;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Active sample source
    pub source: Arc<dyn SampleSource>,
    /// TTL cache for analysis responses
    pub cache: ResultCache,
}

impl AppState {
    /// Create a new application state with the given configuration and source.
    pub fn new(config: AppConfig, source: Arc<dyn SampleSource>) -> Self {
        let cache = ResultCache::new(&config.cache);
        Self {
            config: Arc::new(config),
            source,
            cache,
        }
    }
}
