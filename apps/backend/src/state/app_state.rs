use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::ScoreService;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Score operations, routed to whichever store is active per call
    pub scores: ScoreService,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(scores: ScoreService, config: AppConfig) -> Self {
        Self {
            scores,
            config: Arc::new(config),
        }
    }

    /// Memory-only state for tests
    pub fn for_tests() -> Self {
        Self::new(ScoreService::memory_only(), AppConfig::memory_only())
    }
}
