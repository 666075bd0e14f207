//! Short link creation and resolution service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use metrics::counter;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::{AppError, UniqueKey};
use crate::utils::code_generator::{generate_code, validate_custom_alias};
use crate::utils::url_validator::validate_url;

/// Maximum number of short codes drawn for one shorten request.
pub const MAX_CODE_ATTEMPTS: usize = 10;

/// Service for creating and resolving short links.
///
/// Holds no state besides the store handle, so one instance is shared by all
/// requests. Uniqueness is ultimately enforced by the store; the checks made
/// here only avoid doomed inserts.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Creates a short link, or returns an existing one for the same URL.
    ///
    /// # Deduplication
    ///
    /// Without a custom alias, a link for the identical URL that has not
    /// expired is returned unchanged instead of creating a duplicate.
    ///
    /// # Code Generation
    ///
    /// Draws random 7-character codes, skipping any already used as a code
    /// or alias. An insert that loses a race on the code is retried with a
    /// fresh code. At most [`MAX_CODE_ATTEMPTS`] codes are drawn.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the URL or alias is malformed (no store access)
    /// - [`AppError::AliasConflict`] if the alias is used by any link, expired or not
    /// - [`AppError::CodeGenerationExhausted`] if every drawn code collided
    /// - [`AppError::Internal`] on storage errors
    pub async fn shorten(
        &self,
        original_url: String,
        custom_alias: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<ShortLink, AppError> {
        validate_url(&original_url).map_err(|e| {
            AppError::validation("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        if let Some(alias) = &custom_alias {
            validate_custom_alias(alias)?;
        }

        let now = Utc::now();

        match &custom_alias {
            None => {
                if let Some(existing) = self
                    .link_repository
                    .find_active_by_original_url(&original_url, now)
                    .await?
                {
                    debug!(code = %existing.short_code, "Reusing existing link");
                    counter!("shortlink_links_reused_total").increment(1);
                    return Ok(existing);
                }
            }
            Some(alias) => {
                if self.link_repository.identifier_exists(alias).await? {
                    return Err(alias_conflict(alias));
                }
            }
        }

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let short_code = generate_code().map_err(|e| {
                AppError::internal(
                    "Failed to generate short code",
                    json!({ "reason": e.to_string() }),
                )
            })?;

            if custom_alias.as_deref() == Some(short_code.as_str())
                || self.link_repository.identifier_exists(&short_code).await?
            {
                debug!(attempt, "Generated short code already taken");
                counter!("shortlink_code_collisions_total").increment(1);
                continue;
            }

            let new_link = NewShortLink {
                original_url: original_url.clone(),
                short_code,
                custom_alias: custom_alias.clone(),
                created_at: now,
                expires_at,
            };

            match self.link_repository.insert(new_link).await {
                Ok(link) => {
                    info!(code = %link.short_code, alias = ?link.custom_alias, "Short link created");
                    counter!("shortlink_links_created_total").increment(1);
                    return Ok(link);
                }
                Err(AppError::Conflict {
                    key: UniqueKey::ShortCode,
                    ..
                }) => {
                    debug!(attempt, "Lost short code race, retrying");
                    counter!("shortlink_code_collisions_total").increment(1);
                }
                Err(AppError::Conflict {
                    key: UniqueKey::CustomAlias,
                    ..
                }) => {
                    return Err(alias_conflict(custom_alias.as_deref().unwrap_or_default()));
                }
                Err(e) => return Err(e),
            }
        }

        warn!(attempts = MAX_CODE_ATTEMPTS, "Short code generation exhausted");
        Err(AppError::code_generation_exhausted(
            "Failed to generate unique code",
            json!({ "attempts": MAX_CODE_ATTEMPTS }),
        ))
    }

    /// Resolves a short code or alias to its link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if nothing matches `code`.
    /// Returns [`AppError::Expired`] if the link's expiry is at or before now.
    pub async fn resolve(&self, code: &str) -> Result<ShortLink, AppError> {
        let link = self.find(code).await?;

        if link.is_expired_at(Utc::now()) {
            return Err(AppError::expired(
                "URL has expired",
                json!({ "code": code, "expires_at": link.expires_at }),
            ));
        }

        Ok(link)
    }

    /// Returns a link with its access counters, whether expired or not.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if nothing matches `code`.
    pub async fn stats(&self, code: &str) -> Result<ShortLink, AppError> {
        self.find(code).await
    }

    /// Checks that the record store is reachable.
    pub async fn check_storage(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }

    /// Constructs the full short URL from a base URL and code.
    pub fn short_url(&self, base_url: &str, code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }

    async fn find(&self, code: &str) -> Result<ShortLink, AppError> {
        self.link_repository
            .find_by_identifier(code)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "code": code })))
    }
}

fn alias_conflict(alias: &str) -> AppError {
    AppError::alias_conflict("Custom alias already in use", json!({ "alias": alias }))
}
