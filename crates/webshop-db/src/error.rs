//! # Database Error Types
//!
//! Error types for database operations and the order processor.
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
//! │       ▼                                                                 │
//! │  OrderError ← Rejected(CoreError) | Storage(DbError)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Dashboard displays the message                                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use webshop_core::{CoreError, ValidationError};

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - A second stock level for the same product
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Product referencing a non-existent supplier
    /// - Stock level or restock rule referencing a non-existent product
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// CHECK constraint violation (negative price or stock).
    #[error("Check constraint violation: {message}")]
    CheckViolation { message: String },

    /// Input rejected before reaching the database.
    #[error("Invalid input: {0}")]
    Invalid(#[from] ValidationError),

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted, or a contended write waited past the busy timeout.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Filesystem error while exporting.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot serialization failed.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite constraint messages:
                // "UNIQUE constraint failed: <table>.<column>"
                // "FOREIGN KEY constraint failed"
                // "CHECK constraint failed: <expr>"
                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation {
                        field,
                        value: "unknown".to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else if msg.contains("CHECK constraint failed") {
                    DbError::CheckViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

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

// =============================================================================
// Order Error
// =============================================================================

/// Failure of `process_order`.
///
/// `Rejected` is a local validation failure (missing product, not enough
/// stock, bad quantity); nothing was written. `Storage` is an infrastructure
/// failure propagated unchanged.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error(transparent)]
    Rejected(#[from] CoreError),

    #[error(transparent)]
    Storage(#[from] DbError),
}

impl OrderError {
    /// True when the referenced product does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, OrderError::Rejected(CoreError::ProductNotFound(_)))
    }

    /// True when the product had too little (or no) stock.
    pub fn is_insufficient_stock(&self) -> bool {
        matches!(
            self,
            OrderError::Rejected(CoreError::InsufficientStock { .. })
        )
    }
}

impl From<sqlx::Error> for OrderError {
    fn from(err: sqlx::Error) -> Self {
        OrderError::Storage(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_error_kinds() {
        let err: OrderError = CoreError::ProductNotFound(7).into();
        assert!(err.is_not_found());
        assert!(!err.is_insufficient_stock());
        assert_eq!(err.to_string(), "Product not found: 7");

        let err: OrderError = CoreError::insufficient_stock(1, 4, 6).into();
        assert!(err.is_insufficient_stock());

        let err: OrderError = DbError::PoolExhausted.into();
        assert!(!err.is_not_found());
        assert!(!err.is_insufficient_stock());
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
