//! Application configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::{CuratorError, Result};

/// Root configuration, loaded from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,

    pub wordpress: WordPressConfig,

    #[serde(default)]
    pub translation: TranslationConfig,

    #[serde(default)]
    pub curation: CurationConfig,

    #[serde(default)]
    pub http: HttpConfig,

    /// Ordered find/replace pairs applied to translated text.
    #[serde(default = "defaults::corrections")]
    pub corrections: Vec<Correction>,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| CuratorError::Config(format!("{}: {e}", path.as_ref().display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.feed.url.trim().is_empty() {
            return Err(CuratorError::Config("feed.url is empty".into()));
        }
        if self.wordpress.site.trim().is_empty() {
            return Err(CuratorError::Config("wordpress.site is empty".into()));
        }
        if self.wordpress.token.trim().is_empty() {
            return Err(CuratorError::Config("wordpress.token is empty".into()));
        }
        if self.translation.endpoint.trim().is_empty() {
            return Err(CuratorError::Config("translation.endpoint is empty".into()));
        }
        if self.curation.summary_sentences == 0 {
            return Err(CuratorError::Config(
                "curation.summary_sentences must be > 0".into(),
            ));
        }
        if self.curation.max_sentence_words == 0 {
            return Err(CuratorError::Config(
                "curation.max_sentence_words must be > 0".into(),
            ));
        }
        if self.http.fetch_timeout_secs == 0 || self.http.publish_timeout_secs == 0 {
            return Err(CuratorError::Config("http timeouts must be > 0".into()));
        }
        Ok(())
    }
}

/// Ingestion feed settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "defaults::feed_url")]
    pub url: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: defaults::feed_url(),
        }
    }
}

/// Publishing backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordPressConfig {
    /// Site root, e.g. "https://example.org".
    pub site: String,

    /// JWT bearer token.
    pub token: String,

    #[serde(default = "defaults::category_ids")]
    pub category_ids: Vec<u32>,

    #[serde(default = "defaults::post_status")]
    pub status: String,

    #[serde(default = "defaults::post_format")]
    pub format: String,
}

/// Translation service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    #[serde(default = "defaults::translation_endpoint")]
    pub endpoint: String,

    #[serde(default = "defaults::source_lang")]
    pub source_lang: String,

    #[serde(default = "defaults::target_lang")]
    pub target_lang: String,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "defaults::translation_timeout")]
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::translation_endpoint(),
            source_lang: defaults::source_lang(),
            target_lang: defaults::target_lang(),
            api_key: None,
            timeout_secs: defaults::translation_timeout(),
        }
    }
}

/// Interest matching and summarization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurationConfig {
    /// Newline-delimited interest term list.
    #[serde(default = "defaults::interests_file")]
    pub interests_file: PathBuf,

    /// Optional stopword list override, one word per line.
    #[serde(default)]
    pub stopwords_file: Option<PathBuf>,

    #[serde(default = "defaults::summary_sentences")]
    pub summary_sentences: usize,

    /// Sentences with this many whitespace words or more are not scored.
    #[serde(default = "defaults::max_sentence_words")]
    pub max_sentence_words: usize,

    /// Summaries shorter than this many chars discard the candidate.
    #[serde(default = "defaults::min_summary_chars")]
    pub min_summary_chars: usize,

    /// Label for the source-attribution footer.
    #[serde(default = "defaults::source_label")]
    pub source_label: String,
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            interests_file: defaults::interests_file(),
            stopwords_file: None,
            summary_sentences: defaults::summary_sentences(),
            max_sentence_words: defaults::max_sentence_words(),
            min_summary_chars: defaults::min_summary_chars(),
            source_label: defaults::source_label(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Timeout for feed, page and image fetches.
    #[serde(default = "defaults::fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Timeout for media uploads and post creation.
    #[serde(default = "defaults::publish_timeout")]
    pub publish_timeout_secs: u64,

    #[serde(default = "defaults::max_redirects")]
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            fetch_timeout_secs: defaults::fetch_timeout(),
            publish_timeout_secs: defaults::publish_timeout(),
            max_redirects: defaults::max_redirects(),
        }
    }
}

/// A literal find/replace pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Correction {
    pub find: String,
    pub replace: String,
}

mod defaults {
    use super::Correction;
    use std::path::PathBuf;

    pub fn feed_url() -> String {
        "https://hnrss.org/newest".into()
    }

    pub fn category_ids() -> Vec<u32> {
        vec![91]
    }
    pub fn post_status() -> String {
        "publish".into()
    }
    pub fn post_format() -> String {
        "standard".into()
    }

    pub fn translation_endpoint() -> String {
        "https://libretranslate.com/translate".into()
    }
    pub fn source_lang() -> String {
        "en".into()
    }
    pub fn target_lang() -> String {
        "pt".into()
    }
    pub fn translation_timeout() -> u64 {
        30
    }

    pub fn interests_file() -> PathBuf {
        PathBuf::from("interests.list")
    }
    pub fn summary_sentences() -> usize {
        5
    }
    pub fn max_sentence_words() -> usize {
        30
    }
    pub fn min_summary_chars() -> usize {
        5
    }
    pub fn source_label() -> String {
        "Fonte".into()
    }

    pub fn user_agent() -> String {
        "NewsCurator/1.0".into()
    }
    pub fn fetch_timeout() -> u64 {
        10
    }
    pub fn publish_timeout() -> u64 {
        30
    }
    pub fn max_redirects() -> usize {
        5
    }

    pub fn corrections() -> Vec<Correction> {
        vec![
            Correction {
                find: "ferrugem".into(),
                replace: "rust".into(),
            },
            Correction {
                find: "concha".into(),
                replace: "shell".into(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_toml() -> &'static str {
        r#"
            [wordpress]
            site = "https://news.example.org"
            token = "abc123"
        "#
    }

    #[test]
    fn parse_minimal_config_fills_defaults() {
        let config: Config = toml::from_str(minimal_toml()).unwrap();
        assert_eq!(config.feed.url, "https://hnrss.org/newest");
        assert_eq!(config.wordpress.category_ids, vec![91]);
        assert_eq!(config.wordpress.status, "publish");
        assert_eq!(config.translation.source_lang, "en");
        assert_eq!(config.translation.target_lang, "pt");
        assert_eq!(config.curation.summary_sentences, 5);
        assert_eq!(config.curation.max_sentence_words, 30);
        assert_eq!(config.curation.min_summary_chars, 5);
        assert_eq!(config.http.fetch_timeout_secs, 10);
        assert_eq!(config.http.publish_timeout_secs, 30);
        assert_eq!(config.corrections.len(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_token() {
        let mut config: Config = toml::from_str(minimal_toml()).unwrap();
        config.wordpress.token = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_summary_sentences() {
        let mut config: Config = toml::from_str(minimal_toml()).unwrap();
        config.curation.summary_sentences = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn corrections_override_keeps_order() {
        let toml_str = r#"
            [wordpress]
            site = "https://news.example.org"
            token = "abc123"

            [[corrections]]
            find = "ferrugem"
            replace = "rust"

            [[corrections]]
            find = "concha"
            replace = "shell"

            [[corrections]]
            find = "fio"
            replace = "thread"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        let finds: Vec<&str> = config.corrections.iter().map(|c| c.find.as_str()).collect();
        assert_eq!(finds, vec!["ferrugem", "concha", "fio"]);
    }
}
