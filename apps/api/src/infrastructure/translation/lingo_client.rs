use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::traits::{LanguageRecognizer, TranslationProvider};
use crate::domain::analysis::value_objects::LanguageCode;
use crate::infrastructure::http::ensure_success;

#[derive(Debug, Deserialize)]
struct LocalizeResponse {
    data: Option<LocalizedData>,
}

#[derive(Debug, Deserialize)]
struct LocalizedData {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    locale: Option<String>,
}

/// Lingo.dev engine client for translation and locale recognition.
pub struct LingoClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl LingoClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> anyhow::Result<reqwest::Response> {
        let resp = self
            .http
            .post(format!("{}/{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .with_context(|| format!("lingo {} request failed", path))?;
        ensure_success(resp, "lingo").await
    }
}

#[async_trait]
impl TranslationProvider for LingoClient {
    fn name(&self) -> &'static str {
        "lingo"
    }

    async fn attempt(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> anyhow::Result<Option<String>> {
        let body = serde_json::json!({
            "params": { "fast": true },
            "locale": { "source": source.as_str(), "target": target.as_str() },
            "data": { "text": text }
        });
        let parsed: LocalizeResponse = self
            .post_json("i18n", &body)
            .await?
            .json()
            .await
            .context("malformed lingo translation response")?;

        let translated = parsed
            .data
            .and_then(|d| d.text)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        debug!(found = translated.is_some(), "Lingo translation answered");
        Ok(translated)
    }
}

#[async_trait]
impl LanguageRecognizer for LingoClient {
    async fn recognize(&self, text: &str) -> anyhow::Result<Option<String>> {
        let body = serde_json::json!({ "text": text });
        let parsed: RecognizeResponse = self
            .post_json("recognize", &body)
            .await?
            .json()
            .await
            .context("malformed lingo recognize response")?;
        Ok(parsed.locale.filter(|l| !l.trim().is_empty()))
    }
}
