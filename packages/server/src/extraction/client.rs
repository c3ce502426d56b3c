use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use super::prompts::EXTRACTION_PROMPT;
use super::scan::first_json_object;
use crate::config::ExtractionConfig;

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("extraction API key is not configured")]
    MissingApiKey,
    #[error("request to extraction API failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("extraction API returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("extraction API returned no candidates")]
    EmptyResponse,
    #[error("could not parse extraction reply as JSON: {0}")]
    MalformedReply(String),
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        inline_data: InlineData<'a>,
    },
}

#[derive(Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f64,
    #[serde(rename = "topK")]
    top_k: u32,
    #[serde(rename = "topP")]
    top_p: f64,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    /// Send a document to the model and return the invoice JSON it extracts.
    pub async fn extract_invoice(
        &self,
        document: &[u8],
        mime_type: &str,
    ) -> Result<serde_json::Value, ExtractionError> {
        let api_key = self.api_key.as_deref().ok_or(ExtractionError::MissingApiKey)?;

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: EXTRACTION_PROMPT,
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type,
                            data: BASE64.encode(document),
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: 0.1,
                top_k: 32,
                top_p: 1.0,
                max_output_tokens: 4096,
            },
        };

        let url = format!(
            "{}/models/{}:generateContent",
            self.api_url, self.model
        );
        let response = self
            .http
            .post(&url)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractionError::Api { status, body });
        }

        let reply: GenerateResponse = response.json().await?;
        let text = reply
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or(ExtractionError::EmptyResponse)?;

        let raw = first_json_object(text)
            .ok_or_else(|| ExtractionError::MalformedReply(truncate(text, 200)))?;
        serde_json::from_str(raw).map_err(|e| ExtractionError::MalformedReply(e.to_string()))
    }
}

fn truncate(s: &str, max: usize) -> String {
    let mut end = s.len().min(max);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].to_owned()
}
