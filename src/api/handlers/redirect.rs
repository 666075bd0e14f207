//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use chrono::Utc;
use metrics::counter;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::domain::access_event::AccessEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code or custom alias to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Access Tracking
///
/// A successful redirect sends an [`AccessEvent`] to the background worker.
/// If the queue is full the event is dropped and the redirect still succeeds.
///
/// # Errors
///
/// Returns 404 Not Found if nothing answers to `code`.
/// Returns 410 Gone if the link has expired.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let link = state.link_service.resolve(&code).await?;

    counter!("shortlink_redirects_total").increment(1);

    match state.access_sender.try_send(AccessEvent::new(link.id, Utc::now())) {
        Ok(()) => debug!(code = %code, "Access event queued"),
        Err(TrySendError::Full(_)) => {
            counter!("shortlink_access_events_dropped_total").increment(1);
            warn!(code = %code, "Access queue full, dropping event");
        }
        Err(TrySendError::Closed(_)) => {
            counter!("shortlink_access_events_dropped_total").increment(1);
            warn!(code = %code, "Access queue closed, dropping event");
        }
    }

    Ok(Redirect::temporary(&link.original_url))
}
