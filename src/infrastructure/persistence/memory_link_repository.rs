//! In-memory implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::{AppError, UniqueKey};

/// In-process link store backed by `DashMap`.
///
/// Identifiers (codes and aliases) are claimed through the entry API, which
/// makes each claim atomic. A record is published only after all of its
/// identifiers are claimed; a failed claim releases the ones already taken.
///
/// Data lives as long as the process.
#[derive(Debug)]
pub struct InMemoryLinkRepository {
    records: DashMap<i64, ShortLink>,
    identifiers: DashMap<String, i64>,
    next_id: AtomicI64,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            identifiers: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored links, expired ones included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn claim(&self, identifier: &str, id: i64) -> bool {
        match self.identifiers.entry(identifier.to_owned()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(id);
                true
            }
        }
    }
}

impl Default for InMemoryLinkRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        if !self.claim(&new_link.short_code, id) {
            return Err(AppError::conflict(
                UniqueKey::ShortCode,
                "Identifier already in use",
                json!({ "key": UniqueKey::ShortCode }),
            ));
        }

        if let Some(alias) = &new_link.custom_alias
            && !self.claim(alias, id)
        {
            self.identifiers.remove(&new_link.short_code);
            return Err(AppError::conflict(
                UniqueKey::CustomAlias,
                "Identifier already in use",
                json!({ "key": UniqueKey::CustomAlias }),
            ));
        }

        let link = new_link.into_link(id);
        self.records.insert(id, link.clone());
        Ok(link)
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<ShortLink>, AppError> {
        let Some(id) = self.identifiers.get(identifier).map(|entry| *entry.value()) else {
            return Ok(None);
        };

        Ok(self.records.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_active_by_original_url(
        &self,
        original_url: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ShortLink>, AppError> {
        Ok(self
            .records
            .iter()
            .filter(|entry| entry.original_url == original_url && !entry.is_expired_at(now))
            .min_by_key(|entry| entry.id)
            .map(|entry| entry.value().clone()))
    }

    async fn identifier_exists(&self, identifier: &str) -> Result<bool, AppError> {
        Ok(self.identifiers.contains_key(identifier))
    }

    async fn record_access(&self, id: i64, accessed_at: DateTime<Utc>) -> Result<(), AppError> {
        let Some(mut entry) = self.records.get_mut(&id) else {
            return Err(AppError::not_found("Link not found", json!({ "id": id })));
        };

        let last_accessed_at = entry
            .last_accessed_at
            .map_or(accessed_at, |previous| previous.max(accessed_at));

        entry.redirect_count += 1;
        entry.last_accessed_at = Some(last_accessed_at);

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
