use anyhow::Context;
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::warn;

use super::traits::TranslationProvider;
use crate::domain::analysis::value_objects::LanguageCode;
use crate::infrastructure::http::ensure_success;

/// The public endpoint rejects longer queries.
pub const MAX_QUERY_CHARS: usize = 500;

/// Strings the service returns in place of a translation when it refuses.
const FAILURE_MARKERS: &[&str] = &["PLEASE SELECT", "MYMEMORY WARNING", "QUERY LENGTH LIMIT"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryResponse {
    response_data: Option<ResponseData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    translated_text: Option<String>,
}

/// MyMemory public translation API, used when the remote engine is unavailable.
pub struct MyMemoryClient {
    http: reqwest::Client,
    endpoint: String,
}

impl MyMemoryClient {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

pub fn is_failure_marker(translated: &str) -> bool {
    let upper = translated.to_uppercase();
    FAILURE_MARKERS.iter().any(|m| upper.contains(m))
}

#[async_trait]
impl TranslationProvider for MyMemoryClient {
    fn name(&self) -> &'static str {
        "mymemory"
    }

    async fn attempt(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> anyhow::Result<Option<String>> {
        let query: String = text.chars().take(MAX_QUERY_CHARS).collect();
        let langpair = format!("{}|{}", source, target);
        let url = Url::parse_with_params(
            &self.endpoint,
            &[("q", query.as_str()), ("langpair", langpair.as_str())],
        )
        .context("invalid MyMemory endpoint")?;

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .context("mymemory request failed")?;
        let parsed: MyMemoryResponse = ensure_success(resp, "mymemory")
            .await?
            .json()
            .await
            .context("malformed mymemory response")?;

        let Some(translated) = parsed
            .response_data
            .and_then(|d| d.translated_text)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
        else {
            return Ok(None);
        };

        if is_failure_marker(&translated) {
            warn!(answer = %translated, "MyMemory refused the request");
            return Ok(None);
        }
        Ok(Some(translated))
    }
}
