// src/services/tokenizer.rs

//! Title word counting.
//!
//! The same normalization runs when entries are built and when stored
//! entries are filtered, so classification is reproducible.

use std::sync::LazyLock;

use htmlentity::entity::{ICodedDataTrait, decode};
use regex::Regex;

/// Anything that is not a word character, whitespace or an apostrophe.
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s']").expect("PUNCTUATION regex should compile"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE regex should compile"));

/// Decode HTML entities in a title.
///
/// Falls back to the raw text if decoding yields invalid UTF-8.
pub fn decode_entities(text: &str) -> String {
    decode(text.as_bytes())
        .to_string()
        .unwrap_or_else(|_| text.to_string())
}

/// Normalize a title into single-space separated words.
///
/// Entities are decoded, punctuation other than apostrophes becomes a
/// space, and whitespace runs collapse.
pub fn normalize_title(title: &str) -> String {
    let decoded = decode_entities(title);
    let stripped = PUNCTUATION.replace_all(&decoded, " ");
    WHITESPACE.replace_all(stripped.trim(), " ").into_owned()
}

/// Split a title into its normalized words.
pub fn words(title: &str) -> Vec<String> {
    if title.trim().is_empty() {
        return Vec::new();
    }
    normalize_title(title)
        .split(' ')
        .filter(|word| !word.is_empty())
        .map(String::from)
        .collect()
}

/// Count the words of a title. Empty or whitespace-only titles have none.
pub fn count_words(title: &str) -> usize {
    words(title).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_hn_title() {
        let title = "Ask HN: What's the best way to learn Rust?";
        assert_eq!(
            words(title),
            vec!["Ask", "HN", "What's", "the", "best", "way", "to", "learn", "Rust"]
        );
        assert_eq!(count_words(title), 9);
    }

    #[test]
    fn test_hyphen_splits_words() {
        assert_eq!(words("GPT-5 released"), vec!["GPT", "5", "released"]);
        assert_eq!(count_words("GPT-5 released"), 3);
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \t\n "), 0);
        assert!(words("  ").is_empty());
    }

    #[test]
    fn test_punctuation_only() {
        assert_eq!(count_words("--- ??? !!!"), 0);
    }

    #[test]
    fn test_entities_are_decoded() {
        assert_eq!(normalize_title("Rust &amp; Go"), "Rust Go");
        assert_eq!(count_words("Rust &amp; Go"), 2);
        assert_eq!(count_words("It&#39;s here"), 2);
        assert_eq!(count_words("a&nbsp;b"), 2);
    }

    #[test]
    fn test_apostrophes_kept_inside_words() {
        assert_eq!(words("Don't panic"), vec!["Don't", "panic"]);
    }

    #[test]
    fn test_underscores_and_unicode_are_word_chars() {
        assert_eq!(count_words("snake_case naïve café"), 3);
    }

    #[test]
    fn test_count_is_idempotent_over_normalization() {
        let titles = [
            "Ask HN: What's the best way to learn Rust?",
            "GPT-5 released",
            "Show HN: I built a C++/Rust FFI bridge (2024)",
            "&amp;amp; double-encoded &lt;tags&gt;",
            "  spaced    out\ttitle ",
            "",
            "No Title",
        ];
        for title in titles {
            let normalized = normalize_title(title);
            assert_eq!(
                count_words(&normalized),
                count_words(title),
                "title: {title:?}"
            );
            assert_eq!(normalize_title(&normalized), normalized);
        }
    }
}
