//! Usage audit records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of the operation a usage record was written for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AppliedFilter {
    Scrape,
    MoreThanFiveWords,
    LessThanOrEqualToFiveWords,
}

impl AppliedFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppliedFilter::Scrape => "Scrape",
            AppliedFilter::MoreThanFiveWords => "MoreThanFiveWords",
            AppliedFilter::LessThanOrEqualToFiveWords => "LessThanOrEqualToFiveWords",
        }
    }
}

impl fmt::Display for AppliedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audit row per request. Never mutated once written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsageRecord {
    /// UTC instant of the request
    pub request_timestamp: DateTime<Utc>,

    /// Operation that was requested
    pub applied_filter: AppliedFilter,

    /// Caller identifier, absent for unauthenticated requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_identifier: Option<String>,
}

impl UsageRecord {
    /// Create a record stamped with the current UTC time.
    pub fn now(applied_filter: AppliedFilter, user_identifier: Option<&str>) -> Self {
        Self {
            request_timestamp: Utc::now(),
            applied_filter,
            user_identifier: user_identifier.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_names() {
        assert_eq!(AppliedFilter::Scrape.to_string(), "Scrape");
        assert_eq!(
            AppliedFilter::MoreThanFiveWords.to_string(),
            "MoreThanFiveWords"
        );
        assert_eq!(
            AppliedFilter::LessThanOrEqualToFiveWords.to_string(),
            "LessThanOrEqualToFiveWords"
        );
    }

    #[test]
    fn test_serialized_name_matches_display() {
        let json = serde_json::to_string(&AppliedFilter::LessThanOrEqualToFiveWords).unwrap();
        assert_eq!(json, "\"LessThanOrEqualToFiveWords\"");
    }

    #[test]
    fn test_anonymous_record_omits_identifier() {
        let record = UsageRecord::now(AppliedFilter::MoreThanFiveWords, None);
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("user_identifier").is_none());
        assert_eq!(value["applied_filter"], "MoreThanFiveWords");
    }

    #[test]
    fn test_record_keeps_identifier() {
        let before = Utc::now();
        let record = UsageRecord::now(AppliedFilter::Scrape, Some("alice"));
        assert_eq!(record.user_identifier.as_deref(), Some("alice"));
        assert!(record.request_timestamp >= before);
    }
}
