// src/pipeline/filter.rs

//! Filtered views over stored entries.

use crate::error::Result;
use crate::models::Entry;
use crate::services::{UsageRecorder, WordFilter};
use crate::storage::RecordStore;

/// Load all stored entries, apply the filter and record the usage.
///
/// The usage record is written after the view is computed. Whether an
/// audit failure fails the request is up to the recorder.
pub async fn run_filter(
    filter: WordFilter,
    store: &dyn RecordStore,
    recorder: &UsageRecorder,
    caller: Option<&str>,
) -> Result<Vec<Entry>> {
    let entries = store.load_entries().await?;
    let total = entries.len();
    let view = filter.apply(entries);
    log::info!("{}: {} of {} entries", filter, view.len(), total);

    recorder.record(filter.applied_filter(), caller).await?;
    Ok(view)
}
