//! The per-run orchestrator: one sequential pass over the ingestion
//! feed, one fail-fast state machine per entry.

use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::corrections::ContentCorrector;
use crate::dedupe::PublishedTitles;
use crate::extract;
use crate::feed;
use crate::fetcher::Fetcher;
use crate::interest::TermMatcher;
use crate::media;
use crate::summarize::Summarizer;
use crate::translate::{self, Translate};
use crate::types::{
    CuratorError, FeedEntry, Outcome, PublishCandidate, RawContent, Result, RunReport, SkipReason,
    Summary, TopicScore,
};
use crate::wordpress::{generate_slug, MediaUpload, NewPost, PublishBackend};

pub struct ArticlePublisher {
    matcher: TermMatcher,
    summarizer: Summarizer,
    corrector: ContentCorrector,
    fetcher: Fetcher,
    translator: Box<dyn Translate>,
    backend: Box<dyn PublishBackend>,
    feed_url: String,
    stopwords_file: Option<PathBuf>,
    min_summary_chars: usize,
    source_label: String,
    post_status: String,
    post_format: String,
    category_ids: Vec<u32>,
}

impl ArticlePublisher {
    pub fn new(
        config: &Config,
        matcher: TermMatcher,
        translator: Box<dyn Translate>,
        backend: Box<dyn PublishBackend>,
    ) -> Self {
        Self {
            matcher,
            summarizer: Summarizer::new(
                config.curation.summary_sentences,
                config.curation.max_sentence_words,
            ),
            corrector: ContentCorrector::new(config.corrections.clone()),
            fetcher: Fetcher::new(&config.http),
            translator,
            backend,
            feed_url: config.feed.url.clone(),
            stopwords_file: config.curation.stopwords_file.clone(),
            min_summary_chars: config.curation.min_summary_chars,
            source_label: config.curation.source_label.clone(),
            post_status: config.wordpress.status.clone(),
            post_format: config.wordpress.format.clone(),
            category_ids: config.wordpress.category_ids.clone(),
        }
    }

    /// One full pass: fetch the feed, snapshot the published titles, then
    /// process every entry in order. Per-entry failures are logged and
    /// counted; only startup failures and exhausted summarizer
    /// initialization abort the run.
    pub async fn run(&mut self) -> Result<RunReport> {
        info!("Fetching ingestion feed: {}", self.feed_url);
        let feed_xml = self.fetcher.fetch_text(&self.feed_url).await?;
        let entries = feed::parse_entries(&feed_xml)?;

        let published = PublishedTitles::new(self.backend.published_titles().await?);
        info!(
            "Processing {} entries against {} published titles",
            entries.len(),
            published.len()
        );

        let mut report = RunReport::default();
        for entry in &entries {
            report.examined += 1;
            match self.process_entry(entry, &published).await {
                Ok(Outcome::Published) => {
                    report.published += 1;
                    info!("Published: {}", entry.title);
                }
                Ok(Outcome::Skipped(reason)) => {
                    report.skipped += 1;
                    info!("Skipped '{}': {}", entry.title, reason);
                }
                Err(e) if e.is_fatal() => {
                    error!("Aborting run while processing '{}': {}", entry.title, e);
                    return Err(e);
                }
                Err(e) => {
                    report.failed += 1;
                    error!("Failed '{}': {}", entry.title, e);
                }
            }
        }

        info!(
            "Run complete: {} examined, {} published, {} skipped, {} failed",
            report.examined, report.published, report.skipped, report.failed
        );
        Ok(report)
    }

    /// Drive one entry through the pipeline. The first stage that skips
    /// or fails settles the entry; nothing is retried.
    pub async fn process_entry(
        &mut self,
        entry: &FeedEntry,
        published: &PublishedTitles,
    ) -> Result<Outcome> {
        let Some(topic) = self.check_interest(&entry.title) else {
            return Ok(Outcome::Skipped(SkipReason::NotOfInterest));
        };
        debug!("'{}' matched {:?}", entry.title, topic.matched_terms);

        let raw = self.fetch_article(&entry.link).await?;
        self.process_content(entry, &raw, published).await
    }

    /// The post-fetch stages: summarize, locate the image, translate,
    /// correct, deduplicate, upload the image, create the post.
    pub async fn process_content(
        &mut self,
        entry: &FeedEntry,
        raw: &RawContent,
        published: &PublishedTitles,
    ) -> Result<Outcome> {
        let summary = self.build_summary(&raw.text)?;
        if summary.char_count() < self.min_summary_chars {
            return Ok(Outcome::Skipped(SkipReason::SummaryTooShort {
                chars: summary.char_count(),
            }));
        }

        let Some(image_url) = locate_image(raw) else {
            return Ok(Outcome::Skipped(SkipReason::NoImage));
        };

        let (translated_title, translated_summary) =
            self.translate_texts(&entry.title, &summary.text).await?;
        if translated_summary.chars().count() < self.min_summary_chars {
            return Ok(Outcome::Skipped(SkipReason::SummaryTooShort {
                chars: translated_summary.chars().count(),
            }));
        }

        let mut candidate =
            self.compose_candidate(entry, &translated_title, &translated_summary, image_url);

        if published.is_published(&candidate.translated_title) {
            return Ok(Outcome::Skipped(SkipReason::AlreadyPublished));
        }

        let media_id = self.attach_media(&candidate).await?;
        candidate.image_media_id = Some(media_id);

        self.submit_post(&candidate, media_id).await?;
        Ok(Outcome::Published)
    }

    pub fn check_interest(&self, title: &str) -> Option<TopicScore> {
        let topic = self.matcher.score(title);
        topic.is_of_interest().then_some(topic)
    }

    pub async fn fetch_article(&self, link: &str) -> Result<RawContent> {
        let html = self.fetcher.fetch_text(link).await?;
        Ok(extract::extract_content(&html, link))
    }

    /// Summarize, initializing the language data once if it is missing
    /// and retrying a single time.
    pub fn build_summary(&mut self, text: &str) -> Result<Summary> {
        match self.summarizer.summarize(text) {
            Err(CuratorError::ResourceUnavailable) => {
                warn!("Summarizer language data missing, initializing");
                self.summarizer.initialize(self.stopwords_file.as_deref())?;
                self.summarizer.summarize(text)
            }
            other => other,
        }
    }

    /// Translate the summary, then the title. A transport failure or a
    /// no-op translation of either discards the candidate.
    pub async fn translate_texts(&self, title: &str, summary: &str) -> Result<(String, String)> {
        let translated_summary =
            translate::translate_checked(self.translator.as_ref(), summary).await?;
        let translated_title =
            translate::translate_checked(self.translator.as_ref(), title).await?;
        Ok((translated_title, translated_summary))
    }

    /// Corrected title and body with the source-attribution footer.
    pub fn compose_candidate(
        &self,
        entry: &FeedEntry,
        translated_title: &str,
        translated_summary: &str,
        image_url: String,
    ) -> PublishCandidate {
        let translated_title = self.corrector.correct(translated_title);
        let summary = self.corrector.correct(translated_summary);
        let content = format!(
            "{}\n\n{}: <a href=\"{}\">{}</a>",
            summary, self.source_label, entry.link, entry.link
        );

        PublishCandidate {
            title: entry.title.clone(),
            translated_title,
            content,
            link: entry.link.clone(),
            image_url,
            image_media_id: None,
        }
    }

    /// Download the image into a scoped temporary file and upload it.
    /// The file is removed when this returns, whatever the outcome.
    pub async fn attach_media(&self, candidate: &PublishCandidate) -> Result<u64> {
        let kind = media::image_kind(&candidate.image_url).ok_or_else(|| {
            CuratorError::UnknownMediaType {
                url: candidate.image_url.clone(),
            }
        })?;

        let file = media::download_to_temp(&self.fetcher, &candidate.image_url, &kind.suffix).await?;
        let bytes = std::fs::read(file.path())?;
        let filename = file
            .path()
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        self.backend
            .upload_media(MediaUpload {
                bytes: &bytes,
                filename,
                content_type: kind.mime.clone(),
            })
            .await
    }

    pub async fn submit_post(&self, candidate: &PublishCandidate, media_id: u64) -> Result<()> {
        let post = NewPost {
            title: candidate.translated_title.clone(),
            content: candidate.content.clone(),
            date: None,
            slug: generate_slug(&candidate.translated_title),
            status: self.post_status.clone(),
            format: self.post_format.clone(),
            categories: self.category_ids.clone(),
            tags: Vec::new(),
            featured_media: media_id,
        };

        self.backend.create_post(&post).await
    }
}

/// First usable image candidate, if any. No image means no post.
pub fn locate_image(raw: &RawContent) -> Option<String> {
    raw.image_candidates.first().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::MockTranslator;
    use crate::wordpress::MockBackend;

    fn test_config() -> Config {
        toml::from_str(
            r#"
            [wordpress]
            site = "https://news.example.org"
            token = "test-token"
        "#,
        )
        .unwrap()
    }

    fn test_publisher() -> ArticlePublisher {
        let config = test_config();
        let matcher = TermMatcher::new(
            ["python", "rust", "open source"]
                .iter()
                .map(|t| t.to_string()),
        )
        .unwrap();

        ArticlePublisher::new(
            &config,
            matcher,
            Box::new(MockTranslator::new("[pt] ")),
            Box::new(MockBackend::new()),
        )
    }

    fn entry(title: &str) -> FeedEntry {
        FeedEntry {
            title: title.to_string(),
            link: "https://blog.example.org/post".to_string(),
        }
    }

    #[test]
    fn interest_gate_passes_matching_titles_only() {
        let publisher = test_publisher();

        let topic = publisher
            .check_interest("Python Testing Essentials: A Comprehensive Guide")
            .unwrap();
        assert_eq!(topic.matched_terms, vec!["python".to_string()]);

        assert!(publisher
            .check_interest("Smart Lasers for Bone Surgery")
            .is_none());
    }

    #[test]
    fn summarizer_initializes_lazily_inside_build_summary() {
        let mut publisher = test_publisher();

        let summary = publisher
            .build_summary("Compilers translate code. Compilers optimize translated code fast.")
            .unwrap();
        assert!(!summary.is_empty());
    }

    #[test]
    fn composed_candidate_carries_corrections_and_footer() {
        let publisher = test_publisher();
        let entry = entry("Rust guide");

        let candidate = publisher.compose_candidate(
            &entry,
            "Guia de ferrugem",
            "Um resumo sobre ferrugem e concha.",
            "https://cdn.example.org/pic.png".to_string(),
        );

        assert_eq!(candidate.translated_title, "Guia de rust");
        assert!(candidate.content.starts_with("Um resumo sobre rust e shell."));
        assert!(candidate.content.ends_with(
            "\n\nFonte: <a href=\"https://blog.example.org/post\">https://blog.example.org/post</a>"
        ));
        assert!(candidate.image_media_id.is_none());
    }

    #[test]
    fn first_image_candidate_wins() {
        let raw = RawContent {
            text: String::new(),
            image_candidates: vec![
                "https://cdn.example.org/a.png".to_string(),
                "https://cdn.example.org/b.png".to_string(),
            ],
        };
        assert_eq!(
            locate_image(&raw),
            Some("https://cdn.example.org/a.png".to_string())
        );
        assert_eq!(locate_image(&RawContent::default()), None);
    }

    #[tokio::test]
    async fn uninteresting_entries_skip_without_fetching() {
        let mut publisher = test_publisher();
        let published = PublishedTitles::new(Vec::new());

        // The link is never contacted: the interest gate runs first.
        let outcome = publisher
            .process_entry(&entry("Smart Lasers for Bone Surgery"), &published)
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Skipped(SkipReason::NotOfInterest));
    }
}
