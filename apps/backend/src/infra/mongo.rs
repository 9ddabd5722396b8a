//! Document store bootstrap and connectivity monitoring.

use std::sync::Arc;
use std::time::Duration;

use mongodb::options::ClientOptions;
use mongodb::Client;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::adapters::MongoScoreStore;
use crate::config::{app::DEFAULT_DATABASE, MongoSettings};
use crate::error::AppError;

const APP_NAME: &str = "leaderboard-api";

/// Build the driver client and wrap it in a store.
///
/// The driver connects lazily, so this only fails on an unparseable URI.
/// The initial ping decides the starting mode; an unreachable server is
/// logged and left to the monitor.
pub async fn connect(settings: &MongoSettings) -> Result<Arc<MongoScoreStore>, AppError> {
    let mut options = ClientOptions::parse(&settings.uri)
        .await
        .map_err(|e| AppError::config(format!("invalid MONGODB_URI: {e}")))?;
    options.app_name = Some(APP_NAME.to_string());
    options.connect_timeout = Some(settings.connect_timeout);
    options.server_selection_timeout = Some(settings.connect_timeout);

    let client = Client::with_options(options)
        .map_err(|e| AppError::config(format!("mongo client: {e}")))?;

    let database = match &settings.database {
        Some(name) => client.database(name),
        None => client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
    };
    let db_name = database.name().to_string();
    let store = Arc::new(MongoScoreStore::new(client, database));

    if store.refresh_connectivity().await {
        if let Err(e) = store.ensure_indexes().await {
            warn!(error = %e, "mongo.ensure_indexes_failed");
        }
        info!(database = %db_name, "mongo.ready");
    } else {
        warn!(
            database = %db_name,
            "mongo.unreachable; serving from in-memory store until it comes back"
        );
    }

    Ok(store)
}

/// Re-ping the server on a fixed interval so the active store follows
/// connectivity without a restart.
pub fn spawn_connectivity_monitor(
    store: Arc<MongoScoreStore>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // First tick completes immediately; connect() already probed.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let was_up = store.is_connected();
            if store.refresh_connectivity().await && !was_up {
                if let Err(e) = store.ensure_indexes().await {
                    warn!(error = %e, "mongo.ensure_indexes_failed");
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn malformed_uri_is_config_error() {
        let settings = MongoSettings {
            uri: "not-a-mongo-uri".to_string(),
            database: None,
            connect_timeout: Duration::from_millis(50),
            monitor_interval: Duration::from_millis(50),
        };
        let err = connect(&settings).await.unwrap_err();
        assert!(err.to_string().contains("MONGODB_URI"));
    }
}
