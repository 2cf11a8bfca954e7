//! Error types and handling.

use sea_orm::error::SqlErr;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Excel export error
    #[error("Export error: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Deletion blocked because other records still reference the target
    #[error("Referential conflict: {0}")]
    ReferentialConflict(String),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a validation error with message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not-found error with message
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Translate a storage error into a domain error.
    ///
    /// Foreign-key violations become `ReferentialConflict` carrying the
    /// user-facing hint; anything else passes through as a database error.
    pub fn foreign_key(err: sea_orm::DbErr, hint: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                Self::ReferentialConflict(hint.to_string())
            }
            _ => Self::Database(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;

    #[test]
    fn test_foreign_key_passes_other_errors_through() {
        // Only FK violations become conflicts; everything else stays fatal
        let err = AppError::foreign_key(DbErr::Custom("connection reset".to_string()), "hint");
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_foreign_key_keeps_error_message() {
        let err = AppError::foreign_key(DbErr::Custom("boom".to_string()), "hint");
        assert!(err.to_string().contains("boom"));
    }
}
