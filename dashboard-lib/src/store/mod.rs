//! Key-value storage for persisted dashboard state.
//!
//! Provides a `KeyValueStore` trait and two implementations: an in-memory
//! store and a SQLite-backed store with a read cache. Grid layouts and
//! preferences are stored as JSON strings under namespaced keys.

mod memory;
mod sqlite;

pub use memory::*;
pub use sqlite::*;

use crate::error::StoreError;

/// Backend trait for dashboard state storage.
///
/// Implementations handle raw string storage/retrieval. Calls are
/// synchronous; writes are visible to the next `get` on the same store.
/// There are no transactional guarantees: the last write wins.
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a key.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Get all keys starting with `prefix`.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}
