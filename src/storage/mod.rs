//! Storage abstractions for entry and usage persistence.
//!
//! Both record kinds are append-only. Stored order is insertion order,
//! which the filters rely on for tie-breaking.
//!
//! ## Directory Structure
//!
//! ```text
//! storage/
//! ├── config.toml           # Crawler configuration
//! ├── entries.json          # Every scraped entry, oldest first
//! └── usage.json            # Usage audit log
//! ```

pub mod local;
pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Entry, UsageRecord};

// Re-export for convenience
pub use local::LocalStorage;
pub use memory::MemoryStorage;

/// Trait for record storage backends.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Append a batch of entries. Returns the number stored.
    async fn insert_entries(&self, entries: &[Entry]) -> Result<usize>;

    /// Append a single entry.
    async fn insert_entry(&self, entry: &Entry) -> Result<()> {
        self.insert_entries(std::slice::from_ref(entry)).await?;
        Ok(())
    }

    /// Load every stored entry in insertion order.
    async fn load_entries(&self) -> Result<Vec<Entry>>;

    /// Append a usage record.
    async fn append_usage(&self, record: &UsageRecord) -> Result<()>;

    /// Load the usage log in insertion order.
    async fn load_usage(&self) -> Result<Vec<UsageRecord>>;
}
