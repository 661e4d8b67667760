//! Error types for the store module.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No record stored at this index.
    #[error("no record at index {0}")]
    NotFound(u64),

    /// The store container (directory, database file) does not exist yet.
    #[error("chain store not initialized: {0}")]
    NotInitialized(String),

    /// A stored record could not be decoded.
    #[error("invalid record at index {index}: {reason}")]
    InvalidRecord { index: u64, reason: String },

    /// A record could not be encoded for storage.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Index does not fit the backend's key type.
    #[error("index {0} out of range for this store")]
    IndexOutOfRange(u64),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// A lock guarding shared state was poisoned.
    #[error("store lock poisoned: {0}")]
    Poisoned(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
