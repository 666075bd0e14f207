//! DTOs for the link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::domain::entities::ShortLink;
use crate::utils::timestamp::parse_timestamp;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten.
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Optional user-chosen alias (3-50 alphanumeric characters).
    #[validate(length(min = 3, max = 50, message = "Custom alias must be 3-50 characters"))]
    pub custom_alias: Option<String>,

    /// Optional expiry. ISO-8601; a timestamp without offset is taken as UTC.
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Created (or reused) short link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
    pub short_code: String,
    pub original_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_alias: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShortenResponse {
    pub fn new(link: ShortLink, short_url: String) -> Self {
        Self {
            short_url,
            short_code: link.short_code,
            original_url: link.original_url,
            custom_alias: link.custom_alias,
            expires_at: link.expires_at,
        }
    }
}

fn deserialize_optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;

    raw.map(|value| parse_timestamp(&value).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_deserialize_minimal_request() {
        let request: ShortenRequest =
            serde_json::from_value(json!({ "url": "https://example.com" })).unwrap();

        assert_eq!(request.url, "https://example.com");
        assert!(request.custom_alias.is_none());
        assert!(request.expires_at.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_deserialize_naive_expiry_as_utc() {
        let request: ShortenRequest = serde_json::from_value(json!({
            "url": "https://example.com",
            "expires_at": "2030-06-01T08:30:00"
        }))
        .unwrap();

        assert_eq!(
            request.expires_at,
            Some(Utc.with_ymd_and_hms(2030, 6, 1, 8, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_deserialize_null_expiry() {
        let request: ShortenRequest = serde_json::from_value(json!({
            "url": "https://example.com",
            "expires_at": null
        }))
        .unwrap();

        assert!(request.expires_at.is_none());
    }

    #[test]
    fn test_deserialize_rejects_bad_expiry() {
        let result = serde_json::from_value::<ShortenRequest>(json!({
            "url": "https://example.com",
            "expires_at": "next week"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_url_and_alias() {
        let request = ShortenRequest {
            url: "not-a-valid-url".to_string(),
            custom_alias: Some("ab".to_string()),
            expires_at: None,
        };

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("url"));
        assert!(fields.contains_key("custom_alias"));
    }
}
