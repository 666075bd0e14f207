//! Utility functions for code generation, input validation and error classification.
//!
//! - [`code_generator`] - Short code generation and alias validation
//! - [`url_validator`] - Target URL validation
//! - [`timestamp`] - ISO-8601 parsing with UTC normalization
//! - [`db_error`] - PostgreSQL uniqueness violation classification

pub mod code_generator;
pub mod db_error;
pub mod timestamp;
pub mod url_validator;
