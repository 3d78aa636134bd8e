//! Front-page entry record.

use serde::{Deserialize, Serialize};

use crate::services::tokenizer::count_words;

/// Title used when a listing row has no title anchor.
pub const NO_TITLE: &str = "No Title";

/// One listing record extracted from the front page.
///
/// The word count is always derived from the title. Deserialized records
/// recompute it, so a stored value can never drift from its source title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "StoredEntry")]
pub struct Entry {
    rank: u32,
    title: String,
    points: u32,
    comments: u32,
    word_count: usize,
}

impl Entry {
    /// Create an entry, computing its word count from the title.
    pub fn new(rank: u32, title: impl Into<String>, points: u32, comments: u32) -> Self {
        let title = title.into();
        let word_count = count_words(&title);
        Self {
            rank,
            title,
            points,
            comments,
            word_count,
        }
    }

    /// Position on the source page (0 if unknown).
    pub fn rank(&self) -> u32 {
        self.rank
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    /// Number of comments on the entry.
    pub fn comments(&self) -> u32 {
        self.comments
    }

    /// Number of words in the normalized title.
    pub fn word_count(&self) -> usize {
        self.word_count
    }
}

/// Serialized shape of an entry. A stored `word_count` is ignored.
#[derive(Deserialize)]
struct StoredEntry {
    #[serde(default)]
    rank: u32,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    points: u32,
    #[serde(default)]
    comments: u32,
}

impl From<StoredEntry> for Entry {
    fn from(stored: StoredEntry) -> Self {
        let title = stored.title.unwrap_or_else(|| NO_TITLE.to_string());
        Entry::new(stored.rank, title, stored.points, stored.comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_computes_word_count() {
        let entry = Entry::new(1, "Ask HN: What's the best way to learn Rust?", 10, 4);
        assert_eq!(entry.word_count(), 9);
        assert_eq!(entry.rank(), 1);
        assert_eq!(entry.points(), 10);
        assert_eq!(entry.comments(), 4);
    }

    #[test]
    fn test_placeholder_title_is_counted() {
        let entry = Entry::new(0, NO_TITLE, 0, 0);
        assert_eq!(entry.word_count(), 2);
    }

    #[test]
    fn test_deserialize_recomputes_stale_word_count() {
        let json = r#"{"rank":3,"title":"GPT-5 released","points":7,"comments":1,"word_count":42}"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.word_count(), 3);
        assert_eq!(entry.title(), "GPT-5 released");
    }

    #[test]
    fn test_deserialize_missing_title_uses_placeholder() {
        let json = r#"{"rank":1,"points":2,"comments":3}"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.title(), NO_TITLE);
        assert_eq!(entry.word_count(), 2);
    }

    #[test]
    fn test_serialize_includes_word_count() {
        let entry = Entry::new(2, "Show HN: A tiny crawler", 100, 20);
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["word_count"], 5);
        assert_eq!(value["title"], "Show HN: A tiny crawler");
        assert_eq!(value["comments"], 20);
    }
}
