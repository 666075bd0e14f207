//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::{AppError, UniqueKey};
use crate::utils::db_error::unique_violation_key;

const LINK_COLUMNS: &str = "id, original_url, short_code, custom_alias, created_at, expires_at, \
                            redirect_count, last_accessed_at";

/// PostgreSQL repository for link storage and retrieval.
///
/// Inserts run in a transaction that also claims every identifier of the link
/// in `link_identifiers`, whose primary key enforces the shared code/alias
/// namespace. A violation rolls the whole transaction back.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ShortLinkRow {
    id: i64,
    original_url: String,
    short_code: String,
    custom_alias: Option<String>,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    redirect_count: i64,
    last_accessed_at: Option<DateTime<Utc>>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        ShortLink {
            id: row.id,
            original_url: row.original_url,
            short_code: row.short_code,
            custom_alias: row.custom_alias,
            created_at: row.created_at,
            expires_at: row.expires_at,
            redirect_count: row.redirect_count,
            last_accessed_at: row.last_accessed_at,
        }
    }
}

/// Maps a failed identifier claim to a conflict on `key`.
fn claim_error(e: sqlx::Error, key: UniqueKey) -> AppError {
    if unique_violation_key(&e).is_some() {
        return AppError::conflict(key, "Identifier already in use", json!({ "key": key }));
    }
    AppError::from(e)
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            "INSERT INTO short_links (original_url, short_code, custom_alias, created_at, expires_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {LINK_COLUMNS}"
        );

        let row: ShortLinkRow = sqlx::query_as(&query)
            .bind(&new_link.original_url)
            .bind(&new_link.short_code)
            .bind(&new_link.custom_alias)
            .bind(new_link.created_at)
            .bind(new_link.expires_at)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO link_identifiers (identifier, link_id) VALUES ($1, $2)")
            .bind(&row.short_code)
            .bind(row.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| claim_error(e, UniqueKey::ShortCode))?;

        if let Some(alias) = &row.custom_alias {
            sqlx::query("INSERT INTO link_identifiers (identifier, link_id) VALUES ($1, $2)")
                .bind(alias)
                .bind(row.id)
                .execute(&mut *tx)
                .await
                .map_err(|e| claim_error(e, UniqueKey::CustomAlias))?;
        }

        tx.commit().await?;

        Ok(row.into())
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<ShortLink>, AppError> {
        // PostgreSQL text cannot hold NUL, so no stored identifier matches.
        if identifier.contains('\0') {
            return Ok(None);
        }

        let query = format!(
            "SELECT {LINK_COLUMNS} FROM short_links \
             WHERE short_code = $1 OR custom_alias = $1 \
             LIMIT 1"
        );

        let row: Option<ShortLinkRow> = sqlx::query_as(&query)
            .bind(identifier)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn find_active_by_original_url(
        &self,
        original_url: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ShortLink>, AppError> {
        let query = format!(
            "SELECT {LINK_COLUMNS} FROM short_links \
             WHERE original_url = $1 AND (expires_at IS NULL OR expires_at > $2) \
             ORDER BY id \
             LIMIT 1"
        );

        let row: Option<ShortLinkRow> = sqlx::query_as(&query)
            .bind(original_url)
            .bind(now)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn identifier_exists(&self, identifier: &str) -> Result<bool, AppError> {
        if identifier.contains('\0') {
            return Ok(false);
        }

        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM short_links WHERE short_code = $1 OR custom_alias = $1)",
        )
        .bind(identifier)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn record_access(&self, id: i64, accessed_at: DateTime<Utc>) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE short_links \
             SET redirect_count = redirect_count + 1, \
                 last_accessed_at = GREATEST(COALESCE(last_accessed_at, $2), $2) \
             WHERE id = $1",
        )
        .bind(id)
        .bind(accessed_at)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Link not found", json!({ "id": id })));
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
