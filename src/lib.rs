pub mod types;
pub mod config;
pub mod fetcher;
pub mod feed;
pub mod interest;
pub mod summarize;
pub mod translate;
pub mod corrections;
pub mod extract;
pub mod media;
pub mod dedupe;
pub mod wordpress;
pub mod pipeline;

pub use types::*;
pub use config::Config;
pub use fetcher::Fetcher;
pub use interest::TermMatcher;
pub use summarize::Summarizer;
pub use translate::{HttpTranslator, MockTranslator, Translate};
pub use corrections::ContentCorrector;
pub use dedupe::PublishedTitles;
pub use wordpress::{MockBackend, PublishBackend, WordPressClient};
pub use pipeline::ArticlePublisher;
