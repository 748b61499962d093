//! SaveWorker: debounced snapshot writer
//!
//! Subscribes to the resort's change channel, waits for a quiet period,
//! then writes one snapshot of the whole state. Pending changes are
//! flushed on shutdown.

use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use super::snapshot::ResortSnapshot;
use super::store::{SnapshotStore, StoreError};
use crate::core::{Config, Resort};

/// Capture the current state and write it once
pub async fn save_snapshot(resort: &Resort, store: &dyn SnapshotStore, key: &str) -> Result<(), StoreError> {
    let snapshot = ResortSnapshot::capture(&resort.snapshot(), chrono::Utc::now());
    let document = snapshot.to_value()?;
    store.save(key, &document).await
}

pub struct SaveWorker {
    resort: Resort,
    store: Arc<dyn SnapshotStore>,
    key: String,
    debounce: Duration,
    shutdown: CancellationToken,
}

impl SaveWorker {
    pub fn new(resort: Resort, store: Arc<dyn SnapshotStore>, config: &Config, shutdown: CancellationToken) -> Self {
        Self {
            resort,
            store,
            key: config.basket_name.clone(),
            debounce: Duration::from_millis(config.save_debounce_ms),
            shutdown,
        }
    }

    /// Run the save worker
    ///
    /// Every change event pushes the deadline back by the debounce window,
    /// so a burst of edits produces a single write.
    pub async fn run(self) {
        tracing::info!(
            store = self.store.name(),
            key = %self.key,
            debounce_ms = self.debounce.as_millis() as u64,
            "SaveWorker started"
        );

        let mut rx = self.resort.subscribe();
        let mut deadline: Option<Instant> = None;

        loop {
            let sleep_until = deadline.unwrap_or_else(|| Instant::now() + Duration::from_secs(3600));

            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    tracing::info!("SaveWorker shutting down");
                    let unseen = matches!(
                        rx.try_recv(),
                        Ok(_) | Err(broadcast::error::TryRecvError::Lagged(_))
                    );
                    if deadline.is_some() || unseen {
                        self.flush().await;
                    }
                    break;
                }

                _ = tokio::time::sleep_until(sleep_until), if deadline.is_some() => {
                    self.flush().await;
                    deadline = None;
                }

                result = rx.recv() => {
                    match result {
                        Ok(event) => {
                            tracing::trace!(event = ?event, "Change observed");
                            deadline = Some(Instant::now() + self.debounce);
                        }
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            // the snapshot is always the whole state, missed events lose nothing
                            tracing::warn!("SaveWorker lagged {n} events");
                            deadline = Some(Instant::now() + self.debounce);
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            tracing::info!("Change channel closed, SaveWorker stopping");
                            if deadline.is_some() {
                                self.flush().await;
                            }
                            break;
                        }
                    }
                }
            }
        }

        tracing::info!("SaveWorker stopped");
    }

    /// Failures are logged; the in-memory state is never touched
    async fn flush(&self) {
        match save_snapshot(&self.resort, self.store.as_ref(), &self.key).await {
            Ok(()) => tracing::debug!(store = self.store.name(), "Snapshot saved"),
            Err(e) => tracing::error!(store = self.store.name(), error = %e, "Snapshot save failed"),
        }
    }
}
