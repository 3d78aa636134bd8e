//! In-memory storage backend.
//!
//! Used for tests and one-shot runs that should not touch the disk.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{Entry, UsageRecord};
use crate::storage::RecordStore;

/// Volatile record store.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<Vec<Entry>>,
    usage: Mutex<Vec<UsageRecord>>,
    failing: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with entries.
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            ..Self::default()
        }
    }

    /// Make every subsequent operation fail with a storage error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::storage("memory store is unavailable"));
        }
        Ok(())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> AppError {
    AppError::storage("memory store lock poisoned")
}

#[async_trait]
impl RecordStore for MemoryStorage {
    async fn insert_entries(&self, entries: &[Entry]) -> Result<usize> {
        self.check()?;
        self.entries
            .lock()
            .map_err(poisoned)?
            .extend_from_slice(entries);
        Ok(entries.len())
    }

    async fn load_entries(&self) -> Result<Vec<Entry>> {
        self.check()?;
        Ok(self.entries.lock().map_err(poisoned)?.clone())
    }

    async fn append_usage(&self, record: &UsageRecord) -> Result<()> {
        self.check()?;
        self.usage.lock().map_err(poisoned)?.push(record.clone());
        Ok(())
    }

    async fn load_usage(&self) -> Result<Vec<UsageRecord>> {
        self.check()?;
        Ok(self.usage.lock().map_err(poisoned)?.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppliedFilter;

    #[tokio::test]
    async fn test_insert_and_load_keep_order() {
        let store = MemoryStorage::new();
        store
            .insert_entries(&[Entry::new(1, "First", 1, 1), Entry::new(2, "Second", 2, 2)])
            .await
            .unwrap();
        store.insert_entry(&Entry::new(3, "Third", 3, 3)).await.unwrap();

        let ranks: Vec<_> = store
            .load_entries()
            .await
            .unwrap()
            .iter()
            .map(Entry::rank)
            .collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_failing_mode() {
        let store = MemoryStorage::with_entries(vec![Entry::new(1, "Kept", 0, 0)]);
        store.set_failing(true);
        assert!(store.load_entries().await.is_err());
        assert!(
            store
                .append_usage(&UsageRecord::now(AppliedFilter::Scrape, None))
                .await
                .is_err()
        );

        store.set_failing(false);
        assert_eq!(store.load_entries().await.unwrap().len(), 1);
        assert!(store.load_usage().await.unwrap().is_empty());
    }
}
