//! Database error types for dex-db.

use dex_core::errors::ErrorCode;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Insert hit an id that is already stored.
    #[error("pokemon with id {id} already exists")]
    Conflict { id: i64 },

    /// No row matched the id.
    #[error("pokemon with id {id} not found")]
    NotFound { id: i64 },

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// The stats column could not be encoded or decoded.
    #[error("stats column is not valid JSON: {0}")]
    Stats(#[source] serde_json::Error),

    /// The caller's deadline passed while waiting on the database.
    #[error("database operation timed out")]
    Timeout,

    /// The connection pool could not be built or handed out a connection.
    #[error("connection pool error: {0}")]
    Pool(String),

    /// An in-memory URL was given; each pooled connection would see its own
    /// empty database.
    #[error("in-memory database '{url}' cannot be shared by a connection pool")]
    InMemory { url: String },

    /// The connection pool was shut down.
    #[error("connection pool is closed")]
    PoolClosed,

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}

impl DatabaseError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Conflict { .. } => ErrorCode::Conflict,
            Self::NotFound { .. } => ErrorCode::NotFound,
            _ => ErrorCode::StorageError,
        }
    }
}
