// src/services/usage.rs

//! Usage audit recording.

use std::sync::Arc;

use crate::error::Result;
use crate::models::{AppliedFilter, UsageRecord};
use crate::storage::RecordStore;

/// Appends one usage record per request.
///
/// In the default lenient mode a failed append is logged and swallowed so
/// the caller still gets its result. Strict mode propagates the failure.
#[derive(Clone)]
pub struct UsageRecorder {
    store: Arc<dyn RecordStore>,
    strict: bool,
}

impl UsageRecorder {
    pub fn new(store: Arc<dyn RecordStore>, strict: bool) -> Self {
        Self { store, strict }
    }

    /// Record a request stamped with the current UTC time.
    ///
    /// Returns the record when it was stored, `None` when a lenient
    /// append failed.
    pub async fn record(
        &self,
        filter: AppliedFilter,
        caller: Option<&str>,
    ) -> Result<Option<UsageRecord>> {
        let record = UsageRecord::now(filter, caller);
        match self.store.append_usage(&record).await {
            Ok(()) => {
                log::debug!(
                    "Usage recorded: {} by {}",
                    filter,
                    caller.unwrap_or("anonymous")
                );
                Ok(Some(record))
            }
            Err(e) if self.strict => Err(e),
            Err(e) => {
                log::warn!("Failed to record usage for {}: {}", filter, e);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[tokio::test]
    async fn test_record_appends() {
        let store = Arc::new(MemoryStorage::new());
        let recorder = UsageRecorder::new(store.clone(), false);

        let record = recorder
            .record(AppliedFilter::MoreThanFiveWords, Some("alice"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.user_identifier.as_deref(), Some("alice"));

        let stored = store.load_usage().await.unwrap();
        assert_eq!(stored, vec![record]);
    }

    #[tokio::test]
    async fn test_lenient_mode_swallows_failure() {
        let store = Arc::new(MemoryStorage::new());
        store.set_failing(true);
        let recorder = UsageRecorder::new(store.clone(), false);

        let result = recorder.record(AppliedFilter::Scrape, None).await;
        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_strict_mode_propagates_failure() {
        let store = Arc::new(MemoryStorage::new());
        store.set_failing(true);
        let recorder = UsageRecorder::new(store.clone(), true);

        let result = recorder
            .record(AppliedFilter::LessThanOrEqualToFiveWords, None)
            .await;
        assert!(result.unwrap_err().is_storage());
    }
}
