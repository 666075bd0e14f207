//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "custom_alias": "promo2030",          // optional
///   "expires_at": "2030-01-01T00:00:00Z"  // optional
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "short_url": "http://localhost:3000/aZ3kP9q",
///   "short_code": "aZ3kP9q",
///   "original_url": "https://example.com/some/long/path",
///   "custom_alias": "promo2030",
///   "expires_at": "2030-01-01T00:00:00Z"
/// }
/// ```
///
/// Shortening the same URL again without an alias returns the existing
/// unexpired link.
///
/// # Errors
///
/// - 422 Unprocessable Entity if the body, URL or alias is malformed
/// - 400 Bad Request if the alias is already taken
/// - 500 Internal Server Error if no free short code could be drawn
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state
        .link_service
        .shorten(payload.url, payload.custom_alias, payload.expires_at)
        .await?;

    let short_url = state
        .link_service
        .short_url(&state.base_url, &link.short_code);

    Ok(Json(ShortenResponse::new(link, short_url)))
}
