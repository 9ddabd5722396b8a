//! Background polling of the API's health probe.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::LeaderboardClient;
use crate::model::DbMode;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Probes `/api/health` immediately and then on a fixed interval,
/// publishing the latest backing-store mode. Failed probes keep the last
/// known value. Dropping the poller stops the task.
pub struct HealthPoller {
    rx: watch::Receiver<Option<DbMode>>,
    handle: JoinHandle<()>,
}

impl HealthPoller {
    pub fn spawn(client: LeaderboardClient, interval: Duration) -> Self {
        let (tx, rx) = watch::channel(None);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match client.health().await {
                    Ok(health) => {
                        tx.send_if_modified(|current| {
                            let changed = *current != Some(health.db_mode);
                            *current = Some(health.db_mode);
                            changed
                        });
                    }
                    Err(e) => debug!(error = %e, "health probe failed"),
                }
                if tx.is_closed() {
                    break;
                }
            }
        });

        Self { rx, handle }
    }

    /// Most recent mode, `None` until a probe has succeeded.
    pub fn latest(&self) -> Option<DbMode> {
        *self.rx.borrow()
    }

    /// Receiver for callers that want to await changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<DbMode>> {
        self.rx.clone()
    }
}

impl Drop for HealthPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
