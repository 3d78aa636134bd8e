// src/services/extractor.rs

//! Front-page fragment extraction.
//!
//! Every field is best-effort: a missing or malformed field falls back to
//! its default and the rest of the batch is unaffected.

use scraper::{ElementRef, Html, Selector};

use crate::error::Result;
use crate::models::{NO_TITLE, SelectorConfig};

use super::layout::{ListingLayout, SiblingWalkLayout};
use super::parse_selector;

/// Maximum number of rows taken from one page.
pub const MAX_ENTRIES: usize = 30;

/// Raw fields of one listing row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFragment {
    pub rank: u32,
    pub title: String,
    pub points: u32,
    pub comments: u32,
}

/// Extracts raw fragments from a parsed listing page.
pub struct FragmentExtractor<L = SiblingWalkLayout> {
    layout: L,
    rank: Selector,
    title: Selector,
    score: Selector,
    comments: Selector,
    comment_keyword: String,
}

impl FragmentExtractor {
    /// Create an extractor using the sibling-walk layout.
    pub fn from_config(config: &SelectorConfig) -> Result<Self> {
        Self::with_layout(SiblingWalkLayout::from_config(config)?, config)
    }
}

impl<L: ListingLayout> FragmentExtractor<L> {
    /// Create an extractor with a custom layout.
    pub fn with_layout(layout: L, config: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            layout,
            rank: parse_selector(&config.rank)?,
            title: parse_selector(&config.title)?,
            score: parse_selector(&config.score)?,
            comments: parse_selector(&config.comments)?,
            comment_keyword: config.comment_keyword.clone(),
        })
    }

    /// Lazily extract up to [`MAX_ENTRIES`] fragments in document order.
    ///
    /// Rows past the cap are never visited. A page without any listing rows
    /// yields nothing.
    pub fn fragments<'a>(&'a self, document: &'a Html) -> impl Iterator<Item = RawFragment> + 'a {
        self.layout
            .rows(document)
            .take(MAX_ENTRIES)
            .map(move |row| self.extract_row(row))
    }

    /// Extract the fields of a single listing row.
    pub fn extract_row(&self, row: ElementRef<'_>) -> RawFragment {
        let rank = match row.select(&self.rank).next() {
            Some(node) => parse_rank(&element_text(node)).unwrap_or_else(|| {
                log::debug!("Unparsable rank '{}', using 0", element_text(node));
                0
            }),
            None => 0,
        };

        let title = row
            .select(&self.title)
            .next()
            .map(|node| element_text(node).trim().to_string())
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| {
                log::debug!("Row {} has no title", rank);
                NO_TITLE.to_string()
            });

        let (points, comments) = match self.layout.metadata_row(row) {
            Some(subtext) => (self.extract_points(subtext), self.extract_comments(subtext)),
            None => {
                log::debug!("Row {} has no subtext row", rank);
                (0, 0)
            }
        };

        RawFragment {
            rank,
            title,
            points,
            comments,
        }
    }

    fn extract_points(&self, subtext: ElementRef<'_>) -> u32 {
        let Some(node) = subtext.select(&self.score).next() else {
            return 0;
        };
        let text = element_text(node);
        parse_points(&text).unwrap_or_else(|| {
            log::debug!("Unparsable score '{}', using 0", text);
            0
        })
    }

    fn extract_comments(&self, subtext: ElementRef<'_>) -> u32 {
        // The comment-count link is the last matching anchor in the row.
        let Some(text) = subtext
            .select(&self.comments)
            .map(element_text)
            .filter(|text| text.contains(&self.comment_keyword))
            .last()
        else {
            return 0;
        };
        parse_comments(&text).unwrap_or_else(|| {
            log::debug!("Unparsable comment count '{}', using 0", text);
            0
        })
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Parse rank text such as `"12."`.
pub fn parse_rank(text: &str) -> Option<u32> {
    text.trim().trim_end_matches('.').trim().parse().ok()
}

/// Parse score text such as `"345 points"`.
pub fn parse_points(text: &str) -> Option<u32> {
    let text = text.trim();
    let number = text
        .strip_suffix("points")
        .or_else(|| text.strip_suffix("point"))
        .unwrap_or(text);
    number.trim().parse().ok()
}

/// Parse comment link text such as `"128&nbsp;comments"`.
pub fn parse_comments(text: &str) -> Option<u32> {
    let normalized = text.replace("&nbsp;", " ").replace('\u{a0}', " ");
    let text = normalized.trim();
    let number = text
        .strip_suffix("comments")
        .or_else(|| text.strip_suffix("comment"))
        .unwrap_or(text);
    number.trim().parse().ok()
}
