//! Classification of PostgreSQL uniqueness violations.

use crate::error::UniqueKey;

/// Returns the unique key a failed statement violated, or `None` if the error
/// is not a uniqueness violation.
pub fn unique_violation_key(e: &sqlx::Error) -> Option<UniqueKey> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    Some(match db_err.constraint() {
        Some("short_links_short_code_key") => UniqueKey::ShortCode,
        Some("short_links_custom_alias_key") => UniqueKey::CustomAlias,
        _ => UniqueKey::Other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_is_not_a_violation() {
        assert_eq!(unique_violation_key(&sqlx::Error::RowNotFound), None);
        assert_eq!(unique_violation_key(&sqlx::Error::PoolTimedOut), None);
    }
}
