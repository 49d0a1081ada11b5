use anyhow::Context;
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::Deserialize;
use tracing::{debug, info};

use super::traits::TextExtractionProvider;
use crate::infrastructure::http::ensure_success;

const PRODUCT_PROMPT: &str = r#"You are an expert in skincare products. Look at this image of a skincare product.

1. Identify the brand name.
2. Identify the product name/type. If it's in a foreign language (like Korean, Japanese, Chinese), translate it accurately to English.
3. Extract any other important details like size (e.g., 50ml, 1.68 fl. oz).
4. Consider the shape of the product (e.g., tube, jar, bottle) to infer product type if text is unclear.

Return ONLY the extracted text in a clean, searchable format, combining brand, product name, and details.
Example: "The Face Shop Grapefruit Hand Cream 50ml"
Example: "LANEIGE Water Sleeping Mask 70ml"

Be concise and accurate. If you cannot read something clearly, omit it."#;

/// Answers at or below this length are treated as "nothing read".
const MIN_ANSWER_CHARS: usize = 10;

const REFUSAL_PHRASES: &[&str] = &["not visible", "cannot", "unable to"];

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

/// Vision extraction over an OpenAI-compatible chat-completions API.
pub struct OpenAiVisionClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiVisionClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

fn mime_type_of(image_data: &[u8]) -> &'static str {
    image::guess_format(image_data)
        .map(|f| f.to_mime_type())
        .unwrap_or("image/jpeg")
}

/// Long enough and not a refusal.
pub fn is_usable_answer(answer: &str) -> bool {
    let lower = answer.to_lowercase();
    answer.chars().count() > MIN_ANSWER_CHARS
        && !REFUSAL_PHRASES.iter().any(|p| lower.contains(p))
}

#[async_trait]
impl TextExtractionProvider for OpenAiVisionClient {
    fn name(&self) -> &'static str {
        "openai-vision"
    }

    async fn attempt(&self, image_data: &[u8]) -> anyhow::Result<Option<String>> {
        info!(model = %self.model, bytes = image_data.len(), "Requesting vision extraction");

        let data_url = format!(
            "data:{};base64,{}",
            mime_type_of(image_data),
            STANDARD.encode(image_data)
        );
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": PRODUCT_PROMPT },
                    { "type": "image_url", "image_url": { "url": data_url, "detail": "high" } }
                ]
            }],
            "max_tokens": 200
        });

        let resp = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("vision request failed")?;
        let resp = ensure_success(resp, "vision extraction").await?;

        let parsed: ChatResponse = resp.json().await.context("malformed vision response")?;
        let answer = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().trim_matches('"').trim().to_string())
            .unwrap_or_default();

        if is_usable_answer(&answer) {
            Ok(Some(answer))
        } else {
            debug!(answer = %answer, "Vision answer rejected");
            Ok(None)
        }
    }
}
