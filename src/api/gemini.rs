//! Gemini `generateContent` client.
//!
//! One request per call, no retries and no timeout: a call resolves when the
//! service answers or the transport fails. Callers decide how failures are
//! presented.

use super::TextGenerator;
use crate::libs::config::AiConfig;
use anyhow::{anyhow, bail, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

const API_KEY_HEADER: &str = "x-goog-api-key";
const JSON_MIME_TYPE: &str = "application/json";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug)]
pub struct GeminiClient {
    client: Client,
    config: AiConfig,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &AiConfig, api_key: &str) -> Result<Self> {
        let client = Client::builder().user_agent(concat!("lazgo/", env!("CARGO_PKG_VERSION"))).build()?;
        Ok(Self {
            client,
            config: config.clone(),
            api_key: api_key.to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.config.api_url.trim_end_matches('/'), self.config.model)
    }

    async fn generate(&self, prompt: &str, generation_config: Option<GenerationConfig<'_>>) -> Result<String> {
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config,
        };

        debug!("AI request: model={}, prompt={} chars", self.config.model, prompt.len());
        let start = Instant::now();

        let res = self.client.post(self.endpoint()).header(API_KEY_HEADER, &self.api_key).json(&body).send().await?;
        let status = res.status();
        let text = res.text().await?;

        debug!("AI response: HTTP {} in {:.1}s ({} bytes)", status, start.elapsed().as_secs_f64(), text.len());

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorEnvelope>(&text).map(|e| e.error.message).unwrap_or(text);
            bail!("Gemini API HTTP {}: {}", status, detail);
        }

        extract_text(&text)
    }
}

/// Concatenated text parts of the first candidate.
fn extract_text(body: &str) -> Result<String> {
    let parsed: GenerateResponse = serde_json::from_str(body)?;
    let candidate = parsed.candidates.into_iter().next().ok_or_else(|| anyhow!("response contained no candidates"))?;
    let text: String = candidate
        .content
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        bail!("response contained no text");
    }
    Ok(text)
}

impl TextGenerator for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String> {
        self.generate(prompt, None).await
    }

    async fn generate_json(&self, prompt: &str, schema: &Value) -> Result<String> {
        let config = GenerationConfig {
            response_mime_type: JSON_MIME_TYPE,
            response_schema: schema,
        };
        self.generate(prompt, Some(config)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_joined_parts_of_first_candidate() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Halo "},{"text":"dunia"}],"role":"model"}}]}"#;
        assert_eq!(extract_text(body).unwrap(), "Halo dunia");
    }

    #[test]
    fn rejects_responses_without_text() {
        assert!(extract_text(r#"{"candidates":[]}"#).is_err());
        assert!(extract_text(r#"{"candidates":[{"content":{"parts":[]}}]}"#).is_err());
        assert!(extract_text("not json").is_err());
    }
}
