//! Service layer for the crawler application.
//!
//! This module contains the business logic for:
//! - Title word counting (`tokenizer`)
//! - Listing layouts (`ListingLayout`, `SiblingWalkLayout`)
//! - Fragment extraction (`FragmentExtractor`)
//! - Entry assembly (`build_entries`)
//! - Word-count views (`WordFilter`)
//! - Usage auditing (`UsageRecorder`)

pub mod builder;
pub mod extractor;
pub mod filters;
pub mod layout;
pub mod tokenizer;
mod usage;

use scraper::Selector;

use crate::error::{AppError, Result};

pub use builder::build_entries;
pub use extractor::{FragmentExtractor, MAX_ENTRIES, RawFragment};
pub use filters::{WordFilter, five_or_fewer_words, more_than_five_words};
pub use layout::{ListingLayout, SiblingWalkLayout};
pub use tokenizer::count_words;
pub use usage::UsageRecorder;

/// Compile a CSS selector, mapping failures to `AppError::Selector`.
pub(crate) fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
