use crate::config::TranslationConfig;
use crate::types::{CuratorError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Trait for translation services.
#[async_trait]
pub trait Translate: Send + Sync {
    /// Translate text from the configured source to the target language.
    async fn translate(&self, text: &str) -> Result<String>;
}

/// Translate and check for the silent no-op failure mode: a translator
/// that returns its input unchanged has not translated anything.
pub async fn translate_checked(translator: &dyn Translate, text: &str) -> Result<String> {
    let translated = translator.translate(text).await?;
    if translated == text {
        return Err(CuratorError::TranslationNoop);
    }
    Ok(translated)
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Client for a LibreTranslate-compatible REST endpoint.
pub struct HttpTranslator {
    client: reqwest::Client,
    config: TranslationConfig,
}

impl HttpTranslator {
    pub fn new(config: TranslationConfig, user_agent: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }
}

#[async_trait]
impl Translate for HttpTranslator {
    async fn translate(&self, text: &str) -> Result<String> {
        debug!(
            "Translating {} chars {} -> {}",
            text.chars().count(),
            self.config.source_lang,
            self.config.target_lang
        );

        let request = TranslateRequest {
            q: text,
            source: &self.config.source_lang,
            target: &self.config.target_lang,
            format: "text",
            api_key: self.config.api_key.as_deref(),
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| CuratorError::TranslationFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CuratorError::TranslationFailed(format!(
                "HTTP {status}: {body}"
            )));
        }

        let payload: TranslateResponse = response
            .json()
            .await
            .map_err(|e| CuratorError::TranslationFailed(format!("malformed response: {e}")))?;

        Ok(payload.translated_text)
    }
}

/// Mock translator for development and testing.
pub struct MockTranslator {
    mode: MockMode,
}

enum MockMode {
    Prefix(String),
    Echo,
    Fail(String),
}

impl MockTranslator {
    /// Translates by prepending a marker, so output always differs from
    /// input.
    pub fn new(prefix: &str) -> Self {
        Self {
            mode: MockMode::Prefix(prefix.to_string()),
        }
    }

    /// Returns the input unchanged, the no-op failure mode.
    pub fn echoing() -> Self {
        Self {
            mode: MockMode::Echo,
        }
    }

    /// Always fails with the given message.
    pub fn failing(message: &str) -> Self {
        Self {
            mode: MockMode::Fail(message.to_string()),
        }
    }
}

#[async_trait]
impl Translate for MockTranslator {
    async fn translate(&self, text: &str) -> Result<String> {
        match &self.mode {
            MockMode::Prefix(prefix) => Ok(format!("{prefix}{text}")),
            MockMode::Echo => Ok(text.to_string()),
            MockMode::Fail(message) => Err(CuratorError::TranslationFailed(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn checked_translation_passes_real_output_through() {
        let translator = MockTranslator::new("[pt] ");
        let out = translate_checked(&translator, "hello world").await.unwrap();
        assert_eq!(out, "[pt] hello world");
    }

    #[tokio::test]
    async fn unchanged_output_is_a_noop_failure() {
        let translator = MockTranslator::echoing();
        let result = translate_checked(&translator, "hello world").await;
        assert!(matches!(result, Err(CuratorError::TranslationNoop)));
    }

    #[tokio::test]
    async fn transport_errors_are_translation_failures() {
        let translator = MockTranslator::failing("connection reset");
        let result = translate_checked(&translator, "hello world").await;
        assert!(matches!(result, Err(CuratorError::TranslationFailed(_))));
    }
}
