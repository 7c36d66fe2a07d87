//! # API Error Type
//!
//! Unified error type for shell commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stamp Zoo                              │
//! │                                                                         │
//! │  Command Function → Result<T, ApiError>                                │
//! │         │                                                               │
//! │         ├── DbError (retryable) ───► STORAGE_UNAVAILABLE               │
//! │         ├── DbError (fatal) ───────► INTERNAL                          │
//! │         ├── CoreError / Validation ► NOT_FOUND / VALIDATION_ERROR       │
//! │         ├── ConfigError ───────────► CONFIG_ERROR                      │
//! │         └── parse() == None ───────► INVALID_CODE                      │
//! │                                                                         │
//! │  main.rs prints { code, message } and exits non-zero                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rejections of a collection (already collected, board full) are not
//! errors; they are scan outcomes.

use serde::Serialize;
use stampzoo_core::{CoreError, ValidationError};
use stampzoo_db::DbError;

use crate::config::ConfigError;

/// Error returned from shell commands.
///
/// ## Serialization
/// With `--json` this is what lands on stderr:
/// ```json
/// {
///   "code": "STORAGE_UNAVAILABLE",
///   "message": "Storage is temporarily unavailable, try again"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Scanned text is not a Stamp Zoo code
    InvalidCode,

    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// The store could not complete the operation; retrying may succeed
    StorageUnavailable,

    /// Configuration could not be loaded or is invalid
    ConfigError,

    /// Internal error (corrupt store, failed migration, ...)
    Internal,
}

impl ErrorCode {
    /// Process exit status for this code.
    pub fn exit_status(&self) -> u8 {
        match self {
            ErrorCode::InvalidCode | ErrorCode::ValidationError | ErrorCode::NotFound => 2,
            ErrorCode::ConfigError => 3,
            ErrorCode::StorageUnavailable => 75, // EX_TEMPFAIL
            ErrorCode::Internal => 1,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates the error for text that is not a valid code.
    pub fn invalid_code(raw: &str) -> Self {
        ApiError::new(
            ErrorCode::InvalidCode,
            format!("Not a Stamp Zoo code: {:?}", raw),
        )
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        if err.is_retryable() {
            tracing::error!(error = %err, "Storage unavailable");
            return ApiError::new(
                ErrorCode::StorageUnavailable,
                "Storage is temporarily unavailable, try again",
            );
        }

        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::Corrupt(e) => {
                tracing::error!(error = %e, "Database file is corrupt");
                ApiError::internal("Database file is corrupt")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::internal("Database migration failed")
            }
            other => {
                // Log the actual error but return a generic message
                tracing::error!(error = %other, "Database operation failed");
                ApiError::internal("Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AnimalNotFound(id) => ApiError::not_found("Animal", &id),
            CoreError::InvalidCatalog(e) => ApiError::new(
                ErrorCode::ConfigError,
                format!("Catalog could not be loaded: {}", e),
            ),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::internal(format!("Failed to encode output: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_error_mapping() {
        let busy: ApiError = DbError::Busy("database is locked".into()).into();
        assert_eq!(busy.code, ErrorCode::StorageUnavailable);

        let pool: ApiError = DbError::PoolExhausted.into();
        assert_eq!(pool.code, ErrorCode::StorageUnavailable);

        let migration: ApiError = DbError::MigrationFailed("checksum".into()).into();
        assert_eq!(migration.code, ErrorCode::Internal);

        let disk: ApiError = DbError::StorageIo("disk I/O error".into()).into();
        assert_eq!(disk.code, ErrorCode::StorageUnavailable);

        let corrupt: ApiError = DbError::Corrupt("malformed".into()).into();
        assert_eq!(corrupt.code, ErrorCode::Internal);

        let missing: ApiError = DbError::NotFound {
            entity: "Stamp".into(),
            id: "slot 4".into(),
        }
        .into();
        assert_eq!(missing.code, ErrorCode::NotFound);
        assert_eq!(missing.message, "Stamp not found: slot 4");
    }

    #[test]
    fn test_core_error_mapping() {
        let err: ApiError = CoreError::AnimalNotFound("zz".into()).into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err: ApiError = ValidationError::Required {
            field: "animal_id".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_serialized_code() {
        let json = serde_json::to_value(ApiError::invalid_code("hello")).unwrap();
        assert_eq!(json["code"], "INVALID_CODE");
        assert!(json["message"].as_str().unwrap().contains("hello"));

        let unavailable = ApiError::new(ErrorCode::StorageUnavailable, "x");
        let json = serde_json::to_value(unavailable).unwrap();
        assert_eq!(json["code"], "STORAGE_UNAVAILABLE");
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(ErrorCode::StorageUnavailable.exit_status(), 75);
        assert_ne!(ErrorCode::Internal.exit_status(), 0);
    }
}
