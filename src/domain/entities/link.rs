//! Short link entity representing a code/alias to URL mapping.

use chrono::{DateTime, Utc};

/// A stored short link.
///
/// `created_at` is fixed at creation. The access counters are the only fields
/// that change afterwards, and they never take part in resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortLink {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub custom_alias: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub redirect_count: i64,
    pub last_accessed_at: Option<DateTime<Utc>>,
}

/// Time-driven lifecycle state of a link. `Active` only ever moves to `Expired`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    Active,
    Expired,
}

impl ShortLink {
    /// Lifecycle state at instant `now`.
    pub fn status_at(&self, now: DateTime<Utc>) -> LinkStatus {
        match self.expires_at {
            Some(expires_at) if expires_at <= now => LinkStatus::Expired,
            _ => LinkStatus::Active,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.status_at(now) == LinkStatus::Expired
    }

    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShortLink {
    pub original_url: String,
    pub short_code: String,
    pub custom_alias: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl NewShortLink {
    /// Materializes the record a store persists under `id`.
    pub fn into_link(self, id: i64) -> ShortLink {
        ShortLink {
            id,
            original_url: self.original_url,
            short_code: self.short_code,
            custom_alias: self.custom_alias,
            created_at: self.created_at,
            expires_at: self.expires_at,
            redirect_count: 0,
            last_accessed_at: None,
        }
    }
}
