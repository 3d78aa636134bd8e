//! Local filesystem storage implementation.
//!
//! Keeps entries and usage records as JSON arrays under a root directory.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── entries.json          # Entries, append-only
//! └── usage.json            # Usage records, append-only
//! ```
//!
//! Appends read the current array, extend it and write it back through a
//! temp file and rename, so a crash never leaves a half-written array.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::models::{Entry, UsageRecord};
use crate::storage::RecordStore;

const ENTRIES_KEY: &str = "entries.json";
const USAGE_KEY: &str = "usage.json";

/// Local filesystem storage backend.
#[derive(Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root_dir
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized + Sync>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read a JSON array, treating a missing file as empty.
    async fn read_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                AppError::storage(format!("{} is corrupt: {}", self.path(key).display(), e))
            }),
            None => Ok(Vec::new()),
        }
    }

    /// Append items to a JSON array file.
    async fn append_list<T>(&self, key: &str, items: &[T]) -> Result<usize>
    where
        T: Serialize + DeserializeOwned + Clone + Send + Sync,
    {
        let _guard = self.write_lock.lock().await;
        let mut existing: Vec<T> = self.read_list(key).await?;
        existing.extend_from_slice(items);
        self.write_json(key, &existing).await?;
        Ok(existing.len())
    }
}

#[async_trait]
impl RecordStore for LocalStorage {
    async fn insert_entries(&self, entries: &[Entry]) -> Result<usize> {
        let total = self.append_list(ENTRIES_KEY, entries).await?;
        log::info!(
            "Stored {} entries ({} total) in {}",
            entries.len(),
            total,
            self.path(ENTRIES_KEY).display()
        );
        Ok(entries.len())
    }

    async fn load_entries(&self) -> Result<Vec<Entry>> {
        let entries: Vec<Entry> = self.read_list(ENTRIES_KEY).await?;
        if entries.is_empty() {
            log::warn!("No entries found in {}", self.root_dir.display());
        }
        Ok(entries)
    }

    async fn append_usage(&self, record: &UsageRecord) -> Result<()> {
        self.append_list(USAGE_KEY, std::slice::from_ref(record))
            .await?;
        Ok(())
    }

    async fn load_usage(&self) -> Result<Vec<UsageRecord>> {
        self.read_list(USAGE_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppliedFilter;

    #[tokio::test]
    async fn test_missing_files_read_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("nested"));
        assert!(storage.load_entries().await.unwrap().is_empty());
        assert!(storage.load_usage().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_batches_append_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        let first = vec![Entry::new(1, "First story", 10, 1), Entry::new(2, "Second", 20, 2)];
        let second = vec![Entry::new(1, "First story", 10, 1)];
        assert_eq!(storage.insert_entries(&first).await.unwrap(), 2);
        assert_eq!(storage.insert_entries(&second).await.unwrap(), 1);

        let loaded = storage.load_entries().await.unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0], first[0]);
        assert_eq!(loaded[1], first[1]);
        assert_eq!(loaded[2], second[0]);
        assert!(!dir.path().join("entries.tmp").exists());
    }

    #[tokio::test]
    async fn test_usage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        let anonymous = UsageRecord::now(AppliedFilter::MoreThanFiveWords, None);
        let named = UsageRecord::now(AppliedFilter::Scrape, Some("bob"));
        storage.append_usage(&anonymous).await.unwrap();
        storage.append_usage(&named).await.unwrap();

        assert_eq!(storage.load_usage().await.unwrap(), vec![anonymous, named]);
    }

    #[tokio::test]
    async fn test_stored_word_count_is_recomputed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("entries.json"),
            r#"[{"rank":1,"title":"GPT-5 released","points":3,"comments":4,"word_count":99}]"#,
        )
        .unwrap();

        let storage = LocalStorage::new(dir.path());
        let loaded = storage.load_entries().await.unwrap();
        assert_eq!(loaded[0].word_count(), 3);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("usage.json"), "{not json").unwrap();

        let storage = LocalStorage::new(dir.path());
        let err = storage.load_usage().await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }
}
