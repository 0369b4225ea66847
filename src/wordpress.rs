use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{HttpConfig, WordPressConfig};
use crate::feed;
use crate::types::{CuratorError, Result};

/// A media file ready for upload.
#[derive(Debug, Clone)]
pub struct MediaUpload<'a> {
    pub bytes: &'a [u8],
    pub filename: String,
    pub content_type: String,
}

/// Post creation payload. `date` is always null; the backend assigns the
/// publication time.
#[derive(Debug, Clone, Serialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub date: Option<String>,
    pub slug: String,
    pub status: String,
    pub format: String,
    pub categories: Vec<u32>,
    pub tags: Vec<u32>,
    pub featured_media: u64,
}

/// The publishing side of the pipeline: title snapshot, media upload,
/// post creation.
#[async_trait]
pub trait PublishBackend: Send + Sync {
    /// Titles of already-published posts, from the backend's own feed.
    async fn published_titles(&self) -> Result<Vec<String>>;

    /// Upload media bytes, returning the backend's numeric media id.
    async fn upload_media(&self, upload: MediaUpload<'_>) -> Result<u64>;

    /// Create a post. Success means HTTP 200 or 201.
    async fn create_post(&self, post: &NewPost) -> Result<()>;
}

#[async_trait]
impl<T: PublishBackend + ?Sized> PublishBackend for std::sync::Arc<T> {
    async fn published_titles(&self) -> Result<Vec<String>> {
        (**self).published_titles().await
    }

    async fn upload_media(&self, upload: MediaUpload<'_>) -> Result<u64> {
        (**self).upload_media(upload).await
    }

    async fn create_post(&self, post: &NewPost) -> Result<()> {
        (**self).create_post(post).await
    }
}

/// REST client for a WordPress site with JWT bearer auth.
pub struct WordPressClient {
    client: Client,
    site: String,
    token: String,
}

impl WordPressClient {
    pub fn new(config: &WordPressConfig, http: &HttpConfig) -> Self {
        let client = Client::builder()
            .user_agent(&http.user_agent)
            .timeout(Duration::from_secs(http.publish_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            site: config.site.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

#[async_trait]
impl PublishBackend for WordPressClient {
    async fn published_titles(&self) -> Result<Vec<String>> {
        let url = format!("{}/feed/", self.site);
        debug!("Fetching published titles from {}", url);

        let response = self.client.get(&url).send().await?;
        let body = response.text().await?;
        let titles = feed::parse_titles(&body)?;

        info!("Site feed lists {} published posts", titles.len());
        Ok(titles)
    }

    async fn upload_media(&self, upload: MediaUpload<'_>) -> Result<u64> {
        let url = format!("{}/wp-json/wp/v2/media", self.site);
        debug!(
            "Uploading {} ({}, {} bytes)",
            upload.filename,
            upload.content_type,
            upload.bytes.len()
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.bearer())
            .header(
                "Content-Disposition",
                format!("attachment; filename={}", upload.filename),
            )
            .header("Cache-Control", "no-cache")
            .header("Content-Type", &upload.content_type)
            .body(upload.bytes.to_vec())
            .send()
            .await
            .map_err(|e| CuratorError::MediaUploadFailed {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            warn!("Media upload rejected with {}: {}", status, body);
            return Err(CuratorError::MediaUploadFailed {
                reason: format!("status {}", status.as_u16()),
            });
        }

        let payload: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| CuratorError::MediaUploadFailed {
                    reason: format!("malformed response: {e}"),
                })?;
        let media_id = payload
            .get("id")
            .and_then(|id| id.as_u64())
            .ok_or_else(|| CuratorError::MediaUploadFailed {
                reason: "no media id in response".to_string(),
            })?;

        debug!("Uploaded {} as media {}", upload.filename, media_id);
        Ok(media_id)
    }

    async fn create_post(&self, post: &NewPost) -> Result<()> {
        let url = format!("{}/wp-json/wp/v2/posts", self.site);
        debug!("Creating post: {}", post.title);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.bearer())
            .json(post)
            .send()
            .await
            .map_err(|e| CuratorError::PostCreateFailed {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            return Err(CuratorError::BackendRejected {
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}

/// Slug for a post title: lowercase, spaces become hyphens, and the
/// accented letters the backend cannot keep in a slug are folded.
pub fn generate_slug(title: &str) -> String {
    title
        .to_lowercase()
        .replace(' ', "-")
        .replace('á', "a")
        .replace('ã', "a")
        .replace('å', "a")
        .replace('ó', "o")
        .replace('õ', "o")
        .replace('ö', "o")
        .replace('í', "i")
        .replace('ï', "i")
        .replace('ç', "c")
}

/// In-memory backend for development and testing. Records every call and
/// answers with configurable results.
pub struct MockBackend {
    published: Vec<String>,
    media_id: Option<u64>,
    post_status: u16,
    calls: Mutex<Vec<BackendCall>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    PublishedTitles,
    UploadMedia {
        filename: String,
        content_type: String,
    },
    CreatePost {
        title: String,
        slug: String,
        featured_media: u64,
    },
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            published: Vec::new(),
            media_id: Some(101),
            post_status: 201,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_published(mut self, titles: &[&str]) -> Self {
        self.published = titles.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_media_id(mut self, id: u64) -> Self {
        self.media_id = Some(id);
        self
    }

    pub fn with_failing_upload(mut self) -> Self {
        self.media_id = None;
        self
    }

    pub fn with_post_status(mut self, status: u16) -> Self {
        self.post_status = status;
        self
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().expect("call log poisoned").clone()
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().expect("call log poisoned").push(call);
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PublishBackend for MockBackend {
    async fn published_titles(&self) -> Result<Vec<String>> {
        self.record(BackendCall::PublishedTitles);
        Ok(self.published.clone())
    }

    async fn upload_media(&self, upload: MediaUpload<'_>) -> Result<u64> {
        self.record(BackendCall::UploadMedia {
            filename: upload.filename.clone(),
            content_type: upload.content_type.clone(),
        });

        self.media_id.ok_or(CuratorError::MediaUploadFailed {
            reason: "status 500".to_string(),
        })
    }

    async fn create_post(&self, post: &NewPost) -> Result<()> {
        self.record(BackendCall::CreatePost {
            title: post.title.clone(),
            slug: post.slug.clone(),
            featured_media: post.featured_media,
        });

        if self.post_status == 200 || self.post_status == 201 {
            Ok(())
        } else {
            Err(CuratorError::BackendRejected {
                status: self.post_status,
            })
        }
    }
}
