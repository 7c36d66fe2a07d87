//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ├── is_retryable() → "storage unavailable, try again"            │
//! │       └── otherwise      → fatal, caller decides                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in CLI) ← code + user-facing message                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Business-rule rejections of a collection (already collected, capacity
//! reached) never show up here; they are `CollectOutcome` values.

use thiserror::Error;

// SQLite primary result codes. Extended codes carry the primary code in
// their low byte (e.g. BUSY_SNAPSHOT 517 = 5 | 2 << 8).
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;
const SQLITE_READONLY: i32 = 8;
const SQLITE_IOERR: i32 = 10;
const SQLITE_CORRUPT: i32 = 11;
const SQLITE_FULL: i32 = 13;
const SQLITE_CANTOPEN: i32 = 14;
const SQLITE_NOTADB: i32 = 26;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - A second writer inserted the same animal or slot first
    /// - Any UNIQUE index violation
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// CHECK constraint violation (e.g. slot outside 1..=9).
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// The database is locked by another writer, or this transaction's
    /// snapshot went stale.
    #[error("Database busy: {0}")]
    Busy(String),

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The store could not read or write its file (I/O error, disk full,
    /// read-only file, file cannot be opened).
    #[error("Storage I/O error: {0}")]
    StorageIo(String),

    /// The database file is damaged or is not a SQLite database.
    #[error("Database corrupt: {0}")]
    Corrupt(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction failed to begin or commit.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Whether the store was temporarily unable to complete the operation.
    ///
    /// Retrying is safe: a collection attempt re-evaluates the same rules
    /// against the committed state.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DbError::Busy(_)
                | DbError::PoolExhausted
                | DbError::ConnectionFailed(_)
                | DbError::StorageIo(_)
                | DbError::TransactionFailed(_)
        )
    }

    /// Whether the error is a UNIQUE violation on the given column.
    pub fn is_unique_violation_on(&self, column: &str) -> bool {
        match self {
            DbError::UniqueViolation { field, .. } => {
                field.rsplit('.').next().map(str::trim) == Some(column)
            }
            _ => false,
        }
    }
}

/// Primary result code of a (possibly extended) SQLite code string.
fn primary_code(code: &str) -> Option<i32> {
    code.parse::<i32>().ok().map(|c| c & 0xff)
}

/// Classifies a SQLite error from its result code and message.
fn classify_sqlite(code: Option<&str>, msg: &str) -> DbError {
    // SQLite messages:
    // "UNIQUE constraint failed: <table>.<column>"
    // "CHECK constraint failed: <expr>"
    // "database is locked"
    match code.and_then(primary_code) {
        Some(SQLITE_BUSY | SQLITE_LOCKED) => return DbError::Busy(msg.to_string()),
        Some(SQLITE_IOERR | SQLITE_FULL | SQLITE_CANTOPEN | SQLITE_READONLY) => {
            return DbError::StorageIo(msg.to_string())
        }
        Some(SQLITE_CORRUPT | SQLITE_NOTADB) => return DbError::Corrupt(msg.to_string()),
        _ => {}
    }

    if msg.contains("is locked") {
        DbError::Busy(msg.to_string())
    } else if msg.contains("UNIQUE constraint failed") {
        let field = msg
            .split("UNIQUE constraint failed: ")
            .nth(1)
            .unwrap_or("unknown")
            .to_string();
        DbError::UniqueViolation {
            field,
            value: "unknown".to_string(),
        }
    } else if msg.contains("CHECK constraint failed") {
        DbError::ConstraintViolation(msg.to_string())
    } else {
        DbError::QueryFailed(msg.to_string())
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Busy / StorageIo / Corrupt / UniqueViolation /
///                               ConstraintViolation / QueryFailed
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::Io             → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                classify_sqlite(db_err.code().as_deref(), db_err.message())
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            sqlx::Error::Io(e) => DbError::ConnectionFailed(e.to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(DbError::Busy("database is locked".into()).is_retryable());
        assert!(DbError::PoolExhausted.is_retryable());
        assert!(DbError::ConnectionFailed("disk".into()).is_retryable());
        assert!(DbError::TransactionFailed("commit".into()).is_retryable());

        assert!(!DbError::MigrationFailed("bad".into()).is_retryable());
        assert!(!DbError::Internal("corrupt".into()).is_retryable());
        assert!(!DbError::duplicate("collected_stamps.animal_id", "a1").is_retryable());
    }

    #[test]
    fn test_unique_violation_column() {
        let err = DbError::duplicate("collected_stamps.slot_number", "unknown");
        assert!(err.is_unique_violation_on("slot_number"));
        assert!(!err.is_unique_violation_on("animal_id"));
        assert!(!DbError::PoolExhausted.is_unique_violation_on("slot_number"));
    }

    #[test]
    fn test_busy_codes() {
        assert!(matches!(classify_sqlite(Some("5"), "database is locked"), DbError::Busy(_)));
        assert!(matches!(classify_sqlite(Some("517"), "snapshot"), DbError::Busy(_)));
        assert!(matches!(classify_sqlite(Some("262"), "locked"), DbError::Busy(_)));
        assert!(matches!(classify_sqlite(None, "database is locked"), DbError::Busy(_)));
    }

    #[test]
    fn test_storage_io_codes_are_retryable() {
        // IOERR, IOERR_WRITE, IOERR_FSYNC, FULL, CANTOPEN, READONLY
        for code in ["10", "778", "1034", "13", "14", "8"] {
            let err = classify_sqlite(Some(code), "disk I/O error");
            assert!(matches!(err, DbError::StorageIo(_)), "code {}: {:?}", code, err);
            assert!(err.is_retryable(), "code {}", code);
        }
    }

    #[test]
    fn test_corruption_is_fatal() {
        for code in ["11", "26"] {
            let err = classify_sqlite(Some(code), "database disk image is malformed");
            assert!(matches!(err, DbError::Corrupt(_)), "code {}: {:?}", code, err);
            assert!(!err.is_retryable());
        }
    }

    #[test]
    fn test_constraint_messages() {
        let err = classify_sqlite(
            Some("2067"),
            "UNIQUE constraint failed: collected_stamps.slot_number",
        );
        assert!(err.is_unique_violation_on("slot_number"));
        assert!(!err.is_retryable());

        let err = classify_sqlite(Some("275"), "CHECK constraint failed: slot_number");
        assert!(matches!(err, DbError::ConstraintViolation(_)));

        let err = classify_sqlite(Some("1"), "no such table: nope");
        assert!(matches!(err, DbError::QueryFailed(_)));
    }

    #[test]
    fn test_error_messages() {
        let missing = DbError::NotFound {
            entity: "Stamp".to_string(),
            id: "slot 3".to_string(),
        };
        assert_eq!(missing.to_string(), "Stamp not found: slot 3");
        assert_eq!(
            DbError::duplicate("animal_id", "a1").to_string(),
            "Duplicate animal_id: 'a1' already exists"
        );
    }
}
