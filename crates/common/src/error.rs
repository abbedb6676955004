//! Error types for the lost & found service.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // === Client Errors ===
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Found item not found: {0}")]
    FoundItemNotFound(String),

    #[error("Lost item not found: {0}")]
    LostItemNotFound(String),

    #[error("Claim not found: {0}")]
    ClaimNotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("A contact number is required before using this feature")]
    ContactNumberRequired,

    #[error("You must report a lost item before you can search")]
    LostReportRequired,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    // === Server Errors ===
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            // 4xx Client Errors
            Self::NotFound(_)
            | Self::FoundItemNotFound(_)
            | Self::LostItemNotFound(_)
            | Self::ClaimNotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) | Self::ContactNumberRequired | Self::LostReportRequired => {
                StatusCode::FORBIDDEN
            }
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,

            // 5xx Server Errors
            Self::Database(_) | Self::Storage(_) | Self::Config(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::FoundItemNotFound(_) => "FOUND_ITEM_NOT_FOUND",
            Self::LostItemNotFound(_) => "LOST_ITEM_NOT_FOUND",
            Self::ClaimNotFound(_) => "CLAIM_NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::ContactNumberRequired => "CONTACT_NUMBER_REQUIRED",
            Self::LostReportRequired => "LOST_REPORT_REQUIRED",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns whether this error should be logged at error level.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        if self.is_server_error() {
            tracing::error!(error = %self, code = code, "Server error occurred");
        } else {
            tracing::debug!(error = %self, code = code, "Client error occurred");
        }

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

// === From implementations ===

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_errors_are_forbidden() {
        assert_eq!(
            AppError::ContactNumberRequired.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::LostReportRequired.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::LostReportRequired.error_code(),
            "LOST_REPORT_REQUIRED"
        );
    }

    #[test]
    fn test_server_errors() {
        assert!(AppError::Database("down".to_string()).is_server_error());
        assert!(AppError::Storage("disk full".to_string()).is_server_error());
        assert!(!AppError::Conflict("dup".to_string()).is_server_error());
        assert!(!AppError::Unauthorized.is_server_error());
    }

    #[test]
    fn test_not_found_variants() {
        for err in [
            AppError::FoundItemNotFound("x".to_string()),
            AppError::LostItemNotFound("x".to_string()),
            AppError::ClaimNotFound("x".to_string()),
        ] {
            assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        }
    }
}
