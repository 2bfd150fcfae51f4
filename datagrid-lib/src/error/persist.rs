//! Persistence error types

use thiserror::Error;

/// Error from a filter storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Error saving a filter set.
///
/// Loading never returns this: a payload that cannot be read is treated as
/// "nothing saved".
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
    #[error("serialization error: {0}")]
    Encode(serde_json::Error),
}
