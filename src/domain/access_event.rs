//! Access event model for asynchronous redirect counting.

use chrono::{DateTime, Utc};

/// One successful redirect, queued for the background worker.
///
/// Sent from the redirect handler over a bounded channel so the counter
/// update never sits on the request path. Processed by
/// [`crate::domain::access_worker::run_access_worker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessEvent {
    pub link_id: i64,
    pub accessed_at: DateTime<Utc>,
}

impl AccessEvent {
    pub fn new(link_id: i64, accessed_at: DateTime<Utc>) -> Self {
        Self {
            link_id,
            accessed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_event_creation() {
        let now = Utc::now();
        let event = AccessEvent::new(42, now);

        assert_eq!(event.link_id, 42);
        assert_eq!(event.accessed_at, now);
    }
}
