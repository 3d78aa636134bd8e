// src/services/filters.rs

//! Word-count filters over stored entries.
//!
//! Both views work on every stored entry, not only the latest scrape.
//! Sorting is stable: entries with equal keys keep their storage order.

use std::fmt;

use crate::models::{AppliedFilter, Entry};

use super::tokenizer::count_words;

/// Titles with more words than this are "long".
pub const WORD_THRESHOLD: usize = 5;

/// The two filtered views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordFilter {
    /// More than five words, most commented first
    MoreThanFiveWords,
    /// Five words or fewer, highest scored first
    FiveOrFewerWords,
}

impl WordFilter {
    /// Whether the entry belongs to this view.
    ///
    /// The word count is recomputed from the title rather than read from
    /// the stored record.
    pub fn matches(&self, entry: &Entry) -> bool {
        let words = count_words(entry.title());
        match self {
            WordFilter::MoreThanFiveWords => words > WORD_THRESHOLD,
            WordFilter::FiveOrFewerWords => words <= WORD_THRESHOLD,
        }
    }

    /// Filter and order the entries for this view.
    pub fn apply(&self, entries: impl IntoIterator<Item = Entry>) -> Vec<Entry> {
        let mut selected: Vec<Entry> = entries
            .into_iter()
            .filter(|entry| self.matches(entry))
            .collect();

        match self {
            WordFilter::MoreThanFiveWords => {
                selected.sort_by(|a, b| b.comments().cmp(&a.comments()))
            }
            WordFilter::FiveOrFewerWords => selected.sort_by(|a, b| b.points().cmp(&a.points())),
        }
        selected
    }

    /// Name recorded in the usage log.
    pub fn applied_filter(&self) -> AppliedFilter {
        match self {
            WordFilter::MoreThanFiveWords => AppliedFilter::MoreThanFiveWords,
            WordFilter::FiveOrFewerWords => AppliedFilter::LessThanOrEqualToFiveWords,
        }
    }
}

impl fmt::Display for WordFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.applied_filter().as_str())
    }
}

/// Entries with more than five title words, by comments descending.
pub fn more_than_five_words(entries: impl IntoIterator<Item = Entry>) -> Vec<Entry> {
    WordFilter::MoreThanFiveWords.apply(entries)
}

/// Entries with five or fewer title words, by points descending.
pub fn five_or_fewer_words(entries: impl IntoIterator<Item = Entry>) -> Vec<Entry> {
    WordFilter::FiveOrFewerWords.apply(entries)
}
