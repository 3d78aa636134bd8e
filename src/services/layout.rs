// src/services/layout.rs

//! Listing page layouts.
//!
//! A layout knows where the listing rows are and where each row keeps its
//! points/comments metadata. Field parsing lives in the extractor, so a
//! markup change only needs a new layout.

use scraper::{ElementRef, Html, Selector};

use crate::error::Result;
use crate::models::SelectorConfig;

use super::parse_selector;

/// Structural access to the rows of a listing page.
pub trait ListingLayout: Send + Sync {
    /// Primary listing rows, in document order.
    fn rows<'a>(&'a self, document: &'a Html) -> Box<dyn Iterator<Item = ElementRef<'a>> + 'a>;

    /// The node carrying points/comments for `row`, if any.
    fn metadata_row<'a>(&self, row: ElementRef<'a>) -> Option<ElementRef<'a>>;
}

/// Layout where metadata lives in a later sibling of the listing row.
///
/// Siblings are walked forward until one of the same element kind as the
/// row contains the subtext marker. Running out of siblings is not an error.
pub struct SiblingWalkLayout {
    row: Selector,
    subtext: Selector,
}

impl SiblingWalkLayout {
    /// Build the layout from selector strings.
    pub fn new(row: &str, subtext: &str) -> Result<Self> {
        Ok(Self {
            row: parse_selector(row)?,
            subtext: parse_selector(subtext)?,
        })
    }

    /// Build the layout from configured selectors.
    pub fn from_config(config: &SelectorConfig) -> Result<Self> {
        Self::new(&config.row, &config.subtext)
    }
}

impl ListingLayout for SiblingWalkLayout {
    fn rows<'a>(&'a self, document: &'a Html) -> Box<dyn Iterator<Item = ElementRef<'a>> + 'a> {
        Box::new(document.select(&self.row))
    }

    fn metadata_row<'a>(&self, row: ElementRef<'a>) -> Option<ElementRef<'a>> {
        let row_kind = row.value().name();
        row.next_siblings()
            .filter_map(ElementRef::wrap)
            .filter(|sibling| sibling.value().name() == row_kind)
            .find_map(|sibling| sibling.select(&self.subtext).next())
    }
}
