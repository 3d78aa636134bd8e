//! Application configuration structures.

use std::fs;
use std::path::Path;

use scraper::Selector;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP and page source settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Layout markers of the listing page
    #[serde(default)]
    pub selectors: SelectorConfig,

    /// Usage audit behavior
    #[serde(default)]
    pub usage: UsageConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }

        let url = Url::parse(&self.crawler.source_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::validation(format!(
                "crawler.source_url must be http(s), got '{}'",
                url.scheme()
            )));
        }

        for (name, selector) in self.selectors.entries() {
            Selector::parse(selector).map_err(|e| {
                AppError::selector(selector, format!("selectors.{name}: {e:?}"))
            })?;
        }
        if self.selectors.comment_keyword.trim().is_empty() {
            return Err(AppError::validation("selectors.comment_keyword is empty"));
        }
        Ok(())
    }
}

/// HTTP client and page source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Listing page to scrape
    #[serde(default = "defaults::source_url")]
    pub source_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            source_url: defaults::source_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// CSS selectors describing the front-page layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Primary listing row
    #[serde(default = "defaults::row")]
    pub row: String,

    /// Rank marker inside a row
    #[serde(default = "defaults::rank")]
    pub rank: String,

    /// Title anchor inside a row
    #[serde(default = "defaults::title")]
    pub title: String,

    /// Subtext cell inside the metadata row
    #[serde(default = "defaults::subtext")]
    pub subtext: String,

    /// Score marker inside the subtext cell
    #[serde(default = "defaults::score")]
    pub score: String,

    /// Candidate comment links inside the subtext cell
    #[serde(default = "defaults::comments")]
    pub comments: String,

    /// Substring identifying the comment-count link
    #[serde(default = "defaults::comment_keyword")]
    pub comment_keyword: String,
}

impl SelectorConfig {
    /// Named selector strings, for validation and error messages.
    pub fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("row", self.row.as_str()),
            ("rank", self.rank.as_str()),
            ("title", self.title.as_str()),
            ("subtext", self.subtext.as_str()),
            ("score", self.score.as_str()),
            ("comments", self.comments.as_str()),
        ]
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            row: defaults::row(),
            rank: defaults::rank(),
            title: defaults::title(),
            subtext: defaults::subtext(),
            score: defaults::score(),
            comments: defaults::comments(),
            comment_keyword: defaults::comment_keyword(),
        }
    }
}

/// Usage audit settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UsageConfig {
    /// Fail the request when the audit record cannot be written
    #[serde(default)]
    pub strict: bool,
}

mod defaults {
    // Crawler defaults
    pub fn source_url() -> String {
        "https://news.ycombinator.com/".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; hn-crawler/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Layout defaults
    pub fn row() -> String {
        "tr.athing".into()
    }
    pub fn rank() -> String {
        "td.title > span.rank".into()
    }
    pub fn title() -> String {
        "td.title > span.titleline > a".into()
    }
    pub fn subtext() -> String {
        "td.subtext".into()
    }
    pub fn score() -> String {
        "span.score".into()
    }
    pub fn comments() -> String {
        "a".into()
    }
    pub fn comment_keyword() -> String {
        "comment".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.crawler.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.crawler.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_http_source() {
        let mut config = Config::default();
        config.crawler.source_url = "ftp://news.ycombinator.com/".to_string();
        assert!(matches!(config.validate(), Err(AppError::Validation(_))));

        config.crawler.source_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(AppError::Url(_))));
    }

    #[test]
    fn validate_rejects_broken_selector() {
        let mut config = Config::default();
        config.selectors.score = "[[invalid".to_string();
        match config.validate() {
            Err(AppError::Selector { selector, message }) => {
                assert_eq!(selector, "[[invalid");
                assert!(message.starts_with("selectors.score"));
            }
            other => panic!("expected selector error, got {other:?}"),
        }
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [crawler]
            timeout_secs = 5

            [usage]
            strict = true
            "#,
        )
        .unwrap();
        assert_eq!(config.crawler.timeout_secs, 5);
        assert_eq!(config.crawler.source_url, "https://news.ycombinator.com/");
        assert_eq!(config.selectors.row, "tr.athing");
        assert!(config.usage.strict);
    }

    #[test]
    fn bundled_config_is_valid() {
        let config: Config = toml::from_str(include_str!("../../storage/config.toml")).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.selectors.title, defaults::title());
    }

    #[test]
    fn load_or_default_falls_back_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("missing.toml"));
        assert_eq!(config.selectors.subtext, "td.subtext");
        assert!(!config.usage.strict);
    }
}
