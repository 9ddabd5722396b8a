use std::sync::Arc;

use tracing::{info, warn};

use crate::adapters::MemoryScoreStore;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::infra::mongo;
use crate::repos::scores::ScoreStore;
use crate::services::ScoreService;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    config: AppConfig,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::memory_only(),
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let fallback = Arc::new(MemoryScoreStore::new());

        let primary = match &self.config.mongo {
            Some(settings) => match mongo::connect(settings).await {
                Ok(store) => {
                    mongo::spawn_connectivity_monitor(store.clone(), settings.monitor_interval);
                    Some(store as Arc<dyn ScoreStore>)
                }
                Err(e) => {
                    warn!(error = %e, db_mode = "memory", "mongo unusable; using in-memory store only");
                    None
                }
            },
            None => {
                info!(db_mode = "memory", "mongo disabled; using in-memory store only");
                None
            }
        };

        Ok(AppState::new(
            ScoreService::new(primary, fallback),
            self.config,
        ))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
