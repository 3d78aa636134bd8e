//! Pipeline entry points for crawler operations.
//!
//! - `run_scrape`: Fetch the front page, extract entries and store them
//! - `run_filter`: Apply a word-count view to stored entries and log usage
//! - `CrawlerService`: The operations above bound to their collaborators

pub mod filter;
pub mod scrape;
mod service;

pub use filter::run_filter;
pub use scrape::{extract_entries, run_scrape};
pub use service::CrawlerService;
