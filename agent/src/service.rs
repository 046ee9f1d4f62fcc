//! Generative-text service boundary.
//!
//! [`CompletionService`] is the seam between the adapter and the network.
//! [`GeminiClient`] implements it against the Gemini `generateContent`
//! endpoint with a blocking HTTP client and a whole-request timeout.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ServiceSettings;
use crate::error::ServiceError;

/// Sends a prompt and returns the raw completion text.
pub trait CompletionService {
    fn complete(&self, prompt: &str) -> Result<String, ServiceError>;
}

/// Gemini `generateContent` client.
pub struct GeminiClient {
    http: Client,
    url: String,
    api_key: String,
}

impl GeminiClient {
    /// Builds a client for the configured model.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::HttpError`] if the HTTP client cannot be
    /// constructed (for example, when no TLS backend is available).
    pub fn new(settings: &ServiceSettings, api_key: impl Into<String>) -> Result<Self, ServiceError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            url: generate_url(&settings.endpoint, &settings.model),
            api_key: api_key.into(),
        })
    }
}

impl CompletionService for GeminiClient {
    fn complete(&self, prompt: &str) -> Result<String, ServiceError> {
        debug!(url = %self.url, "sending prompt to generative-text service");
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.0,
                response_mime_type: "application/json",
            },
        };

        let response = self
            .http
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ServiceError::StatusError {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateResponse = response.json()?;
        first_candidate_text(body).ok_or(ServiceError::EmptyResponse)
    }
}

fn generate_url(endpoint: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        endpoint.trim_end_matches('/'),
        model
    )
}

fn first_candidate_text(response: GenerateResponse) -> Option<String> {
    let candidate = response.candidates.into_iter().next()?;
    let text: String = candidate
        .content?
        .parts
        .into_iter()
        .map(|part| part.text)
        .collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}
