//! Periodic eviction of abandoned editing sessions.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::sessions::EditorSessions;

/// Run the sweep loop until `cancel` is triggered.
///
/// Every `interval`, sessions unused for at least `max_idle` are dropped
/// along with their unsaved changes.
pub async fn run(
    sessions: Arc<EditorSessions>,
    max_idle: Duration,
    interval: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(
        max_idle_secs = max_idle.as_secs(),
        interval_secs = interval.as_secs(),
        "Session sweeper started"
    );

    // A zero period would panic in `interval`.
    let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session sweeper stopping");
                break;
            }
            _ = ticker.tick() => {
                let evicted = sessions.evict_idle(max_idle).await;
                if evicted.is_empty() {
                    tracing::debug!("Session sweep: nothing idle");
                } else {
                    tracing::info!(evicted = evicted.len(), "Session sweep: evicted idle sessions");
                }
            }
        }
    }
}
