use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicScore {
    pub matched_terms: Vec<String>,
    pub score: u32,
}

impl TopicScore {
    pub fn is_of_interest(&self) -> bool {
        self.score > 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct RawContent {
    pub text: String,
    pub image_candidates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub text: String,
}

impl Summary {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct PublishCandidate {
    pub title: String,
    pub translated_title: String,
    pub content: String,
    pub link: String,
    pub image_url: String,
    pub image_media_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotOfInterest,
    SummaryTooShort { chars: usize },
    NoImage,
    AlreadyPublished,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotOfInterest => write!(f, "not of interest"),
            SkipReason::SummaryTooShort { chars } => {
                write!(f, "summary too short ({chars} chars)")
            }
            SkipReason::NoImage => write!(f, "no image found on page"),
            SkipReason::AlreadyPublished => write!(f, "already published"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Published,
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub examined: usize,
    pub published: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum CuratorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    FeedParse(String),

    #[error("Content fetch failed for {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    #[error("Summarizer language data not loaded")]
    ResourceUnavailable,

    #[error("Translation failed: {0}")]
    TranslationFailed(String),

    #[error("Translation returned the input unchanged")]
    TranslationNoop,

    #[error("Image not retrievable from {url}: {reason}")]
    ImageUnresolvable { url: String, reason: String },

    #[error("Cannot determine media type for {url}")]
    UnknownMediaType { url: String },

    #[error("Media upload failed: {reason}")]
    MediaUploadFailed { reason: String },

    #[error("Backend rejected post (status {status})")]
    BackendRejected { status: u16 },

    #[error("Post creation failed: {reason}")]
    PostCreateFailed { reason: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CuratorError {
    /// Errors that abort the whole run instead of a single candidate.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CuratorError::ResourceUnavailable | CuratorError::Config(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CuratorError>;
