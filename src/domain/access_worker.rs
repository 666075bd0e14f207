//! Background worker applying access events to link counters.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info};

use crate::domain::access_event::AccessEvent;
use crate::domain::repositories::LinkRepository;

/// Retries per event after the first failed attempt.
const MAX_RETRIES: usize = 3;

/// Consumes access events until every sender is dropped.
///
/// Each event increments the link's redirect counter through
/// [`LinkRepository::record_access`], retried with jittered exponential
/// backoff. Events that still fail are logged and dropped.
pub async fn run_access_worker<L>(mut rx: mpsc::Receiver<AccessEvent>, repository: Arc<L>)
where
    L: LinkRepository + ?Sized,
{
    while let Some(event) = rx.recv().await {
        let strategy = ExponentialBackoff::from_millis(10)
            .map(jitter)
            .take(MAX_RETRIES);

        let result = Retry::start(strategy, || {
            repository.record_access(event.link_id, event.accessed_at)
        })
        .await;

        match result {
            Ok(()) => debug!(link_id = event.link_id, "Access recorded"),
            Err(e) => error!(link_id = event.link_id, error = %e, "Failed to record access"),
        }
    }

    info!("Access worker stopped");
}
