//! Application error type shared by the core, the record stores and the HTTP layer.
//!
//! Every error carries a human-readable message and a JSON `details` value.
//! [`AppError`] implements [`IntoResponse`], producing:
//!
//! ```json
//! { "error": { "code": "alias_conflict", "message": "...", "details": { ... } } }
//! ```

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::db_error::unique_violation_key;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Unique key reported by a record store when an insert loses a uniqueness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UniqueKey {
    ShortCode,
    CustomAlias,
    Other,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed URL, alias or request body.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// The requested alias is already used as a code or alias.
    #[error("{message}")]
    AliasConflict { message: String, details: Value },

    /// Every generated short code collided.
    #[error("{message}")]
    CodeGenerationExhausted { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The link exists but is past its expiry.
    #[error("{message}")]
    Expired { message: String, details: Value },

    /// Uniqueness violation raised by the record store.
    #[error("{message}")]
    Conflict {
        key: UniqueKey,
        message: String,
        details: Value,
    },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn validation(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn alias_conflict(message: impl Into<String>, details: Value) -> Self {
        Self::AliasConflict {
            message: message.into(),
            details,
        }
    }

    pub fn code_generation_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::CodeGenerationExhausted {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn expired(message: impl Into<String>, details: Value) -> Self {
        Self::Expired {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(key: UniqueKey, message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            key,
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status the error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::AliasConflict { .. } => StatusCode::BAD_REQUEST,
            AppError::CodeGenerationExhausted { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Expired { .. } => StatusCode::GONE,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code used in response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::AliasConflict { .. } => "alias_conflict",
            AppError::CodeGenerationExhausted { .. } => "code_generation_exhausted",
            AppError::NotFound { .. } => "not_found",
            AppError::Expired { .. } => "expired",
            AppError::Conflict { .. } => "conflict",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::AliasConflict { message, details }
            | AppError::CodeGenerationExhausted { message, details }
            | AppError::NotFound { message, details }
            | AppError::Expired { message, details }
            | AppError::Conflict {
                message, details, ..
            }
            | AppError::Internal { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(key) = unique_violation_key(&e) {
            return AppError::conflict(
                key,
                "Unique constraint violation",
                json!({ "key": key }),
            );
        }

        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::validation("Request validation failed", details)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::validation(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}
