// src/pipeline/scrape.rs

//! Front-page scraping pipeline: fetch, extract, persist.

use scraper::Html;

use crate::error::Result;
use crate::models::Entry;
use crate::services::{FragmentExtractor, ListingLayout, build_entries};
use crate::storage::RecordStore;
use crate::utils::PageFetcher;

/// Parse a page body and build its entries.
pub fn extract_entries<L: ListingLayout>(extractor: &FragmentExtractor<L>, body: &str) -> Vec<Entry> {
    let document = Html::parse_document(body);
    build_entries(extractor.fragments(&document))
}

/// Run one scrape pass and store the resulting batch.
///
/// Fetch and storage failures fail the whole pass; nothing is stored when
/// the page cannot be retrieved.
pub async fn run_scrape<L: ListingLayout>(
    url: &str,
    extractor: &FragmentExtractor<L>,
    fetcher: &dyn PageFetcher,
    store: &dyn RecordStore,
) -> Result<Vec<Entry>> {
    log::info!("Fetching {}", url);
    let body = fetcher.fetch(url).await?;

    let entries = extract_entries(extractor, &body);
    if entries.is_empty() {
        log::warn!("No listing rows found at {}", url);
    } else {
        log::info!("Extracted {} entries", entries.len());
    }

    store.insert_entries(&entries).await?;
    Ok(entries)
}
