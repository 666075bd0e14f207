//! Repository trait for short link records.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Record store for short links.
///
/// Short codes and custom aliases share one identifier namespace. Stores must
/// enforce that namespace atomically in [`LinkRepository::insert`]; the
/// existence checks are only a fast path for the common case.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Persists a new link in a single atomic write.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] with the violated [`crate::error::UniqueKey`]
    /// if the short code or alias is already used as any identifier. No partial
    /// record is left behind.
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Finds the link whose short code or custom alias equals `identifier`.
    ///
    /// Expired links are returned too; expiry is the caller's concern.
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<ShortLink>, AppError>;

    /// Finds a link for `original_url` that is not expired at `now`.
    async fn find_active_by_original_url(
        &self,
        original_url: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ShortLink>, AppError>;

    /// Returns true if `identifier` is used as a short code or alias by any
    /// link, expired or not.
    async fn identifier_exists(&self, identifier: &str) -> Result<bool, AppError>;

    /// Increments the redirect counter and sets the last access time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has the given id.
    async fn record_access(&self, id: i64, accessed_at: DateTime<Utc>) -> Result<(), AppError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
