//! External generative-model client
//!
//! Delegates the `AI` operation to a Gemini-style `generateContent` REST
//! API. A prioritized model list is walked in order with no delay between
//! attempts; the first successful response wins and the last error observed
//! is what propagates when every model fails.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::AiConfig;
use crate::error::{ApiError, Result};
use crate::logger;

/// Instruction wrapped around the caller's question.
const ONE_WORD_INSTRUCTION: &str =
    "Answer the following question with exactly one word. Do not use punctuation.";

/// Request body for the generateContent endpoint
#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

/// Response body for the generateContent endpoint
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Client for the external generative-language service
pub struct ModelClient {
    client: Client,
    api_key: String,
    endpoint: String,
    models: Vec<String>,
}

impl ModelClient {
    /// Create a new client from configuration
    ///
    /// Each model attempt carries the configured request timeout, so a hung
    /// upstream cannot hold a request open indefinitely.
    pub fn new(cfg: &AiConfig) -> std::result::Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: cfg.api_key.clone(),
            endpoint: cfg.endpoint.trim_end_matches('/').to_string(),
            models: cfg.models.clone(),
        })
    }

    /// Answer a question with a single word.
    ///
    /// Tries each configured model in order, reusing the same prompt. Each
    /// failure is logged for operators; callers only ever see a generic
    /// unavailability error carrying the last failure.
    pub async fn ask(&self, question: &str) -> Result<String> {
        let prompt = build_prompt(question);
        let mut last_err = "no models configured".to_string();

        for model in &self.models {
            match self.generate(model, &prompt).await {
                Ok(text) => {
                    let word = sanitize_answer(&text);
                    if word.is_empty() {
                        last_err = format!("model '{model}' returned no usable text");
                        logger::log_model_attempt_failed(model, &last_err);
                        continue;
                    }
                    return Ok(word);
                }
                Err(e) => {
                    last_err = e;
                    logger::log_model_attempt_failed(model, &last_err);
                }
            }
        }

        Err(ApiError::ExternalServiceUnavailable(last_err))
    }

    /// Make a single generateContent request against one model
    async fn generate(&self, model: &str, prompt: &str) -> std::result::Result<String, String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, model, self.api_key
        );
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        match response.status() {
            StatusCode::OK => {
                let body: GenerateResponse = response
                    .json()
                    .await
                    .map_err(|e| format!("failed to parse response: {e}"))?;

                body.candidates
                    .first()
                    .and_then(|c| c.content.parts.first())
                    .map(|p| p.text.clone())
                    .ok_or_else(|| "response contained no candidates".to_string())
            }
            status => {
                let detail = response.text().await.unwrap_or_default();
                Err(format!("API error {status}: {detail}"))
            }
        }
    }
}

/// Build the fixed one-word prompt around the caller's question
fn build_prompt(question: &str) -> String {
    format!("{ONE_WORD_INSTRUCTION}\n\nQuestion: {}", question.trim())
}

/// Reduce free-form model output to a single clean word:
/// the first whitespace-delimited token with all non-alphanumeric
/// characters stripped.
fn sanitize_answer(text: &str) -> String {
    text.split_whitespace()
        .next()
        .unwrap_or("")
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}
