//! ISO-8601 timestamp parsing.
//!
//! Timestamps with an offset are converted to UTC; timestamps without one are
//! taken to already be UTC.

use chrono::{DateTime, NaiveDateTime, Utc};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses an ISO-8601 timestamp into a UTC instant.
///
/// ```ignore
/// parse_timestamp("2030-01-01T12:00:00+02:00")?; // 10:00 UTC
/// parse_timestamp("2030-01-01T12:00:00")?;       // 12:00 UTC
/// ```
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let input = input.trim();

    let rfc3339_err = match DateTime::parse_from_rfc3339(input) {
        Ok(dt) => return Ok(dt.with_timezone(&Utc)),
        Err(e) => e,
    };

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or(rfc3339_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_with_offset() {
        let parsed = parse_timestamp("2030-01-01T12:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2030, 1, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_zulu() {
        let parsed = parse_timestamp("2030-01-01T12:00:00Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_as_utc() {
        let parsed = parse_timestamp("2030-01-01T12:00:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap());

        let parsed = parse_timestamp("2030-01-01 12:00:00.250").unwrap();
        assert_eq!(parsed.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_timestamp("tomorrow").is_err());
        assert!(parse_timestamp("").is_err());
    }
}
