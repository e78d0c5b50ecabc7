//! Key-value persistence for task and preference blobs.
//!
//! Stores are synchronous and string-keyed. Each call is atomic on its own;
//! there are no transactions spanning calls.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use anyhow::Result;
use std::sync::Arc;

/// A durable string-keyed blob store.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored at `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` at `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Shared handle used by the services.
pub type SharedStore = Arc<dyn KeyValueStore>;
