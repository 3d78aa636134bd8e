// src/lambda/mod.rs

//! AWS Lambda handler for the crawler.
//!
//! One invocation runs one operation:
//! 1. `scrape`: fetch the front page and store a new batch
//! 2. `filter/morethanfivewords`: long titles, most commented first
//! 3. `filter/lessthanfivewords`: short titles, highest scored first

use std::path::PathBuf;
use std::sync::Arc;

use lambda_runtime::{Error as LambdaError, LambdaEvent};

use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::error::Result;
use crate::models::{Config, Entry};
use crate::pipeline::CrawlerService;
use crate::storage::LocalStorage;

/// Operation requested by the caller.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub enum Operation {
    #[serde(rename = "scrape")]
    Scrape,
    #[serde(rename = "filter/morethanfivewords")]
    FilterMoreThanFive,
    #[serde(rename = "filter/lessthanfivewords")]
    FilterFiveOrFewer,
}

/// Lambda invocation payload.
#[derive(Debug, Deserialize)]
pub struct ApiRequest {
    /// Operation to run
    pub operation: Operation,

    /// Authenticated caller, if any
    #[serde(default)]
    pub caller: Option<String>,
}

/// Lambda response payload.
#[derive(Debug, Serialize, Default)]
pub struct ApiResponse {
    /// Whether the operation succeeded
    pub success: bool,

    /// Number of entries returned
    pub count: usize,

    /// Returned entries
    pub entries: Vec<Entry>,

    /// Error message if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Execution time in milliseconds
    pub execution_time_ms: u64,
}

/// Main Lambda handler function.
#[instrument(skip(event))]
pub async fn handler(event: LambdaEvent<ApiRequest>) -> std::result::Result<ApiResponse, LambdaError> {
    let start = std::time::Instant::now();
    let (request, _context) = event.into_parts();

    info!(
        "Starting {:?}: caller={:?}",
        request.operation, request.caller
    );

    let result = match build_service() {
        Ok(service) => run_operation(&service, &request).await,
        Err(e) => Err(e),
    };
    let execution_time_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(entries) => {
            info!(
                "{:?} completed: {} entries in {}ms",
                request.operation,
                entries.len(),
                execution_time_ms
            );
            Ok(ApiResponse {
                success: true,
                count: entries.len(),
                entries,
                error: None,
                execution_time_ms,
            })
        }
        Err(e) => {
            error!("{:?} failed: {}", request.operation, e);
            Ok(ApiResponse {
                success: false,
                error: Some(e.to_string()),
                execution_time_ms,
                ..Default::default()
            })
        }
    }
}

/// Dispatch a request to the service.
pub async fn run_operation(service: &CrawlerService, request: &ApiRequest) -> Result<Vec<Entry>> {
    let caller = request.caller.as_deref();
    match request.operation {
        Operation::Scrape => service.scrape(caller).await,
        Operation::FilterMoreThanFive => service.filter_more_than_five(caller).await,
        Operation::FilterFiveOrFewer => service.filter_five_or_fewer(caller).await,
    }
}

fn build_service() -> Result<CrawlerService> {
    let config = load_lambda_config()?;
    let storage_dir =
        std::env::var("STORAGE_DIR").unwrap_or_else(|_| "/tmp/hn-crawler".to_string());
    let store = Arc::new(LocalStorage::new(PathBuf::from(storage_dir)));
    CrawlerService::with_http(Arc::new(config), store)
}

/// Load configuration suitable for Lambda environment.
fn load_lambda_config() -> Result<Config> {
    let mut config = match std::env::var("CONFIG_PATH") {
        Ok(path) => Config::load(&path)?,
        Err(_) => Config::default(),
    };

    // Override from environment if available
    if let Ok(url) = std::env::var("SOURCE_URL") {
        config.crawler.source_url = url;
    }

    if let Ok(timeout) = std::env::var("CRAWL_TIMEOUT_SECS") {
        if let Ok(secs) = timeout.parse() {
            config.crawler.timeout_secs = secs;
        }
    }

    config.validate()?;
    Ok(config)
}
