//! Gemini HTTP clients: schema-constrained generation and query embeddings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{GenerationClient, GenerationError};
use crate::config::AnalysisConfig;
use crate::pipeline::retrieval::{EmbeddingModel, RetrievalError};
use crate::pipeline::schema::OutputSchema;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GENERATION_MODEL: &str = "gemini-1.5-pro-latest";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-004";

/// Gemini generateContent client. Requests `application/json` output
/// constrained by the registered schema, so the backend enforces shape
/// before validation does.
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    /// The generation timeout comes from the same config the orchestrator
    /// runs with, so `generation_timeout_secs` is always honored.
    pub fn new(base_url: &str, model: &str, api_key: &str, config: &AnalysisConfig) -> Self {
        let timeout_secs = config.generation_timeout_secs;
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            client,
            timeout_secs,
        }
    }

    /// Default public endpoint with the standard generation model.
    pub fn with_api_key(api_key: &str, config: &AnalysisConfig) -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_GENERATION_MODEL, api_key, config)
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: String,
}

fn map_send_error(e: reqwest::Error, base_url: &str, timeout_secs: u64) -> GenerationError {
    if e.is_connect() {
        GenerationError::Connection(base_url.to_string())
    } else if e.is_timeout() {
        GenerationError::Timeout(timeout_secs)
    } else {
        GenerationError::Http(e.to_string())
    }
}

impl GenerationClient for GeminiClient {
    fn generate_structured(
        &self,
        instruction: &str,
        schema: &OutputSchema,
    ) -> Result<String, GenerationError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: instruction }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema.to_response_schema(),
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| map_send_error(e, &self.base_url, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let raw_body = response
            .text()
            .map_err(|e| GenerationError::ResponseParsing(e.to_string()))?;
        let parsed: GenerateContentResponse = serde_json::from_str(&raw_body)
            .map_err(|e| GenerationError::ResponseParsing(e.to_string()))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text);

        match text {
            Some(text) => Ok(text),
            None => Err(GenerationError::NonConformant {
                detail: "backend returned no candidates".into(),
                raw: raw_body,
            }),
        }
    }
}

/// Gemini embedContent client, used to embed retrieval queries against the
/// pre-built policy index.
pub struct GeminiEmbedder {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl GeminiEmbedder {
    pub fn new(base_url: &str, model: &str, api_key: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            client,
        }
    }

    pub fn with_api_key(api_key: &str, timeout_secs: u64) -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_EMBEDDING_MODEL, api_key, timeout_secs)
    }
}

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: EmbeddingValues,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

impl EmbeddingModel for GeminiEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, RetrievalError> {
        let url = format!(
            "{}/models/{}:embedContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let body = serde_json::json!({
            "content": { "parts": [ { "text": text } ] }
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| RetrievalError::EmbeddingFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(RetrievalError::EmbeddingFailed(format!(
                "status {status}: {body}"
            )));
        }

        let parsed: EmbedContentResponse = response
            .json()
            .map_err(|e| RetrievalError::EmbeddingFailed(e.to_string()))?;

        Ok(parsed.embedding.values)
    }
}
