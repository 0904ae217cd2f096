//! Key-value store error types

use thiserror::Error;

/// Errors raised by a [`KeyValueStore`](crate::store::KeyValueStore).
///
/// The grid layout manager never surfaces these to its callers; they are
/// logged and treated as "nothing persisted".
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
