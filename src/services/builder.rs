// src/services/builder.rs

//! Entry assembly from extracted fragments.

use crate::models::Entry;

use super::extractor::RawFragment;

impl From<RawFragment> for Entry {
    fn from(fragment: RawFragment) -> Self {
        Entry::new(
            fragment.rank,
            fragment.title,
            fragment.points,
            fragment.comments,
        )
    }
}

/// Build entries in the order the fragments were extracted.
pub fn build_entries(fragments: impl IntoIterator<Item = RawFragment>) -> Vec<Entry> {
    fragments.into_iter().map(Entry::from).collect()
}
