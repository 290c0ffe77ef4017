use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::news::NewsClient;
use crate::types::NewsItem;

/// Shared snapshot of the most recently fetched articles. Concurrent
/// refreshes are not deduplicated; the last write wins.
pub type NewsState = Arc<RwLock<Vec<NewsItem>>>;

pub const REFRESH_PERIOD: Duration = Duration::from_secs(5 * 60);

/// Periodic news refresh owned by the application lifecycle. The task
/// re-invokes the fetcher on every tick (first tick fires immediately)
/// and stops when `shutdown` is called or the process exits.
pub struct Refresher {
    shutdown_tx: watch::Sender<()>,
    handle: JoinHandle<()>,
}

impl Refresher {
    pub fn spawn(client: NewsClient, state: NewsState, period: Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(());
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => {
                        info!("news refresher shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let items = client.fetch_news().await;
                        debug!(count = items.len(), "refreshed news snapshot");
                        *state.write().await = items;
                    }
                }
            }
        });
        Self {
            shutdown_tx,
            handle,
        }
    }

    /// Stop the task and wait for it to exit.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        let _ = self.handle.await;
    }
}
