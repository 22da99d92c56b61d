//! Google Gemini REST client.
//!
//! Thin wrapper over the `generateContent` endpoint: prompt text in,
//! completion text out. Prompt construction and response validation are
//! the caller's concern.

use serde::{Deserialize, Serialize};

use crate::error::{AiClientError, Result};

/// Default model used for completions.
pub const DEFAULT_MODEL: &str = "gemini-pro";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Low temperature keeps classification and extraction answers stable.
const TEMPERATURE: f32 = 0.1;

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Client for the Gemini text-generation API.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Build a client from `GEMINI_API_KEY` (and optionally
    /// `GEMINI_MODEL`). A missing key is a configuration error raised
    /// at start-up, not at query time.
    pub fn from_env() -> Result<Self> {
        let api_key =
            std::env::var("GEMINI_API_KEY").map_err(|_| AiClientError::MissingCredential)?;
        let mut client = Self::new(api_key);
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            client.model = model;
        }
        Ok(client)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point the client at a different host. Intended for tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Generate a completion for a prompt.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        };

        tracing::debug!(
            model = %self.model,
            prompt_length = prompt.len(),
            "calling Gemini API"
        );

        let response = self.http.post(&url).json(&request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), "Gemini API call failed");
            return Err(AiClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response.json().await?;
        let text: String = body
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AiClientError::EmptyResponse);
        }

        tracing::debug!(response_length = text.len(), "Gemini API response received");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_requires_the_credential() {
        // Isolate from any ambient key.
        std::env::remove_var("GEMINI_API_KEY");
        assert!(matches!(
            GeminiClient::from_env(),
            Err(AiClientError::MissingCredential)
        ));
    }

    #[test]
    fn response_text_concatenates_parts() {
        let body: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "expense" }, { "text": "_ratio" }] }
            }]
        }))
        .unwrap();

        let text: String = body.candidates[0]
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        assert_eq!(text, "expense_ratio");
    }

    #[tokio::test]
    #[ignore] // Requires API key
    async fn generate_against_live_api() {
        let client = GeminiClient::from_env().expect("GEMINI_API_KEY must be set");

        let response = client
            .generate("Say 'Hello, World!' and nothing else.")
            .await
            .expect("completion should succeed");

        assert!(response.contains("Hello"));
    }
}
