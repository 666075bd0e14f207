//! Short code generation and custom alias validation.
//!
//! Codes are drawn from the operating system CSPRNG so that knowing one code
//! says nothing about any other.

use crate::error::AppError;
use serde_json::json;

/// Length of a generated short code.
pub const CODE_LENGTH: usize = 7;

/// Characters a generated short code is drawn from.
pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub const ALIAS_MIN_LENGTH: usize = 3;
pub const ALIAS_MAX_LENGTH: usize = 50;

/// Largest multiple of 62 that fits in a byte. Bytes at or above it are
/// discarded so every alphabet character is equally likely.
const REJECTION_THRESHOLD: u8 = 248;

/// Aliases that would be shadowed by fixed routes.
const RESERVED_ALIASES: &[&str] = &["shorten", "stats", "health"];

/// Generates a random 7-character alphanumeric short code.
///
/// # Errors
///
/// Returns the underlying [`getrandom::Error`] if the system random source fails.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code()?;
/// assert_eq!(code.len(), 7);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> Result<String, getrandom::Error> {
    let mut code = String::with_capacity(CODE_LENGTH);
    let mut buffer = [0u8; 16];

    while code.len() < CODE_LENGTH {
        getrandom::fill(&mut buffer)?;

        for &byte in buffer.iter().filter(|&&b| b < REJECTION_THRESHOLD) {
            code.push(ALPHABET[usize::from(byte) % ALPHABET.len()] as char);
            if code.len() == CODE_LENGTH {
                break;
            }
        }
    }

    Ok(code)
}

/// Returns `true` if `code` has the shape of a generated short code.
#[cfg(test)]
pub(crate) fn is_valid_short_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| ALPHABET.contains(&b))
}

/// Validates a user-provided custom alias.
///
/// # Rules
///
/// - Length: 3-50 characters
/// - Allowed characters: ASCII letters and digits
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_alias(alias: &str) -> Result<(), AppError> {
    let length = alias.chars().count();
    if !(ALIAS_MIN_LENGTH..=ALIAS_MAX_LENGTH).contains(&length) {
        return Err(AppError::validation(
            "Custom alias must be 3-50 characters",
            json!({ "provided_length": length }),
        ));
    }

    if !alias.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::validation(
            "Custom alias must be alphanumeric",
            json!({ "alias": alias }),
        ));
    }

    if RESERVED_ALIASES.contains(&alias) {
        return Err(AppError::validation(
            "This alias is reserved",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}
