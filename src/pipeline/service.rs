// src/pipeline/service.rs

//! Operations exposed to transports (CLI, Lambda).

use std::sync::Arc;

use crate::error::Result;
use crate::models::{AppliedFilter, Config, Entry, UsageRecord};
use crate::services::{FragmentExtractor, UsageRecorder, WordFilter};
use crate::storage::RecordStore;
use crate::utils::{HttpFetcher, PageFetcher};

use super::filter::run_filter;
use super::scrape::run_scrape;

/// Scrape and filter operations over an explicit store and fetcher.
pub struct CrawlerService {
    config: Arc<Config>,
    store: Arc<dyn RecordStore>,
    fetcher: Arc<dyn PageFetcher>,
    extractor: FragmentExtractor,
    recorder: UsageRecorder,
}

impl CrawlerService {
    /// Create a service with the given collaborators.
    pub fn new(
        config: Arc<Config>,
        store: Arc<dyn RecordStore>,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Result<Self> {
        let extractor = FragmentExtractor::from_config(&config.selectors)?;
        let recorder = UsageRecorder::new(Arc::clone(&store), config.usage.strict);
        Ok(Self {
            config,
            store,
            fetcher,
            extractor,
            recorder,
        })
    }

    /// Create a service that fetches over HTTP.
    pub fn with_http(config: Arc<Config>, store: Arc<dyn RecordStore>) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::from_config(&config.crawler)?);
        Self::new(config, store, fetcher)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scrape the source page and store a fresh batch of entries.
    ///
    /// Every call appends a new batch; earlier batches are never merged or
    /// deduplicated.
    pub async fn scrape(&self, caller: Option<&str>) -> Result<Vec<Entry>> {
        self.recorder.record(AppliedFilter::Scrape, caller).await?;
        run_scrape(
            &self.config.crawler.source_url,
            &self.extractor,
            self.fetcher.as_ref(),
            self.store.as_ref(),
        )
        .await
    }

    /// Run one of the word-count views.
    pub async fn filter(&self, filter: WordFilter, caller: Option<&str>) -> Result<Vec<Entry>> {
        run_filter(filter, self.store.as_ref(), &self.recorder, caller).await
    }

    /// Entries with more than five title words, most commented first.
    pub async fn filter_more_than_five(&self, caller: Option<&str>) -> Result<Vec<Entry>> {
        self.filter(WordFilter::MoreThanFiveWords, caller).await
    }

    /// Entries with five or fewer title words, highest scored first.
    pub async fn filter_five_or_fewer(&self, caller: Option<&str>) -> Result<Vec<Entry>> {
        self.filter(WordFilter::FiveOrFewerWords, caller).await
    }

    /// All stored entries in storage order.
    pub async fn entries(&self) -> Result<Vec<Entry>> {
        self.store.load_entries().await
    }

    /// The usage log.
    pub async fn usage(&self) -> Result<Vec<UsageRecord>> {
        self.store.load_usage().await
    }
}
