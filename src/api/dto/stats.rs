//! DTOs for link statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::ShortLink;

/// Access counters and metadata for a single link.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub short_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_alias: Option<String>,
    pub original_url: String,
    pub redirect_count: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub last_accessed_at: Option<DateTime<Utc>>,
    pub expired: bool,
}

impl StatsResponse {
    pub fn new(link: ShortLink, now: DateTime<Utc>) -> Self {
        Self {
            expired: link.is_expired_at(now),
            short_code: link.short_code,
            custom_alias: link.custom_alias,
            original_url: link.original_url,
            redirect_count: link.redirect_count,
            created_at: link.created_at,
            expires_at: link.expires_at,
            last_accessed_at: link.last_accessed_at,
        }
    }
}
