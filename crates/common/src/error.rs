//! Error types for counselhub.

use thiserror::Error;

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Broad error taxonomy reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing field, bad format, or unknown entity. Nothing was mutated.
    Validation,
    /// The request collides with current state (unavailable counsellor,
    /// booked slot, full event, duplicate registration).
    Conflict,
    /// Authentication or authorization failure.
    Access,
    /// A multi-step operation failed and was rolled back.
    Transaction,
}

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // === Client Errors ===
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    // === Server Errors ===
    #[error("Database error: {0}")]
    Database(String),

    #[error("Transaction failed: {0}")]
    Transaction(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the error code for machine-readable output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Transaction(_) => "TRANSACTION_FAILED",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Maps the error onto the caller-facing taxonomy.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound(_) | Self::BadRequest(_) | Self::Validation(_) => {
                ErrorCategory::Validation
            }
            Self::Conflict(_) => ErrorCategory::Conflict,
            Self::Unauthorized | Self::Forbidden(_) => ErrorCategory::Access,
            Self::Database(_) | Self::Transaction(_) | Self::Config(_) | Self::Internal(_) => {
                ErrorCategory::Transaction
            }
        }
    }

    /// Returns whether this error should be logged at error level.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self.category(), ErrorCategory::Transaction)
    }

    /// Message safe to show to an end user.
    ///
    /// Server-side failures collapse to one generic sentence so that no
    /// partial state or internal detail leaks out.
    #[must_use]
    pub fn user_message(&self) -> String {
        if self.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "Server error occurred");
            return "The operation failed and no changes were made. Please try again.".to_string();
        }

        tracing::debug!(error = %self, code = self.error_code(), "Client error occurred");
        match self {
            Self::NotFound(msg)
            | Self::Forbidden(msg)
            | Self::BadRequest(msg)
            | Self::Validation(msg)
            | Self::Conflict(msg) => msg.clone(),
            Self::Unauthorized => "Invalid credentials.".to_string(),
            _ => self.to_string(),
        }
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

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            AppError::NotFound("x".into()).category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            AppError::Conflict("slot".into()).category(),
            ErrorCategory::Conflict
        );
        assert_eq!(AppError::Unauthorized.category(), ErrorCategory::Access);
        assert_eq!(
            AppError::Transaction("boom".into()).category(),
            ErrorCategory::Transaction
        );
    }

    #[test]
    fn test_user_message_hides_server_detail() {
        let err = AppError::Database("constraint fk_feedback_session failed".into());
        let msg = err.user_message();
        assert!(!msg.contains("fk_feedback_session"));
        assert!(err.is_server_error());
    }

    #[test]
    fn test_user_message_keeps_client_detail() {
        let err = AppError::Conflict("Event is at full capacity".into());
        assert_eq!(err.user_message(), "Event is at full capacity");
        assert_eq!(err.error_code(), "CONFLICT");
    }

    #[test]
    fn test_from_db_err() {
        let err: AppError = sea_orm::DbErr::Custom("nope".into()).into();
        assert!(matches!(err, AppError::Database(_)));
    }
}
