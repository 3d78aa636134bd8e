// src/models/mod.rs

//! Domain models for the crawler application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod entry;
mod usage;

// Re-export all public types
pub use config::{Config, CrawlerConfig, SelectorConfig, UsageConfig};
pub use entry::{Entry, NO_TITLE};
pub use usage::{AppliedFilter, UsageRecord};
