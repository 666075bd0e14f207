//! Target URL validation.
//!
//! Only absolute `http`/`https` URLs with a host are accepted. The URL is
//! stored exactly as submitted, so validation never rewrites the input.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Checks that `input` is a well-formed absolute URL.
///
/// # Security
///
/// Rejects schemes such as `javascript:`, `data:` and `file:` so a short link
/// can never redirect to something other than a web page.
///
/// # Errors
///
/// See [`UrlValidationError`] for the individual failure reasons.
pub fn validate_url(input: &str) -> Result<Url, UrlValidationError> {
    if input.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if input.trim() != input {
        return Err(UrlValidationError::InvalidFormat(
            "leading or trailing whitespace".to_string(),
        ));
    }

    // Url::parse drops these; the raw input must stay a valid header value.
    if input.chars().any(char::is_control) {
        return Err(UrlValidationError::InvalidFormat(
            "control characters are not allowed".to_string(),
        ));
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlValidationError::MissingHost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://example.com/path?q=1#frag").is_ok());
        assert!(validate_url("https://sub.example.com:8443/a/b").is_ok());
    }

    #[test]
    fn test_rejects_relative_and_garbage() {
        assert!(matches!(
            validate_url("not-a-valid-url"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_url("/relative/path"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(validate_url(""), Err(UrlValidationError::Empty)));
    }

    #[test]
    fn test_rejects_dangerous_schemes() {
        for input in [
            "javascript:alert(1)",
            "data:text/html,hi",
            "file:///etc/passwd",
            "ftp://example.com/file",
        ] {
            assert!(
                matches!(validate_url(input), Err(UrlValidationError::UnsupportedProtocol)),
                "{input}"
            );
        }
    }

    #[test]
    fn test_rejects_surrounding_whitespace() {
        assert!(validate_url(" https://example.com").is_err());
        assert!(validate_url("https://example.com\n").is_err());
    }

    #[test]
    fn test_rejects_embedded_control_characters() {
        for input in [
            "https://example.com/a\nb",
            "https://example.com/a\u{1}b",
            "https://exa\tmple.com/",
            "https://example.com/a\u{7f}",
        ] {
            assert!(
                matches!(validate_url(input), Err(UrlValidationError::InvalidFormat(_))),
                "{input:?}"
            );
        }
    }

    #[test]
    fn test_rejects_missing_host() {
        assert!(validate_url("https://").is_err());
    }
}
