//! Gemini-backed [`Enhancer`] implementation (feature `gemini`).

use async_trait::async_trait;

use crate::enhance::Enhancer;
use crate::error::EnhancerError;

/// [`Enhancer`] over the Gemini client.
///
/// Provider errors are flattened into [`EnhancerError`] so the assistant
/// never depends on provider types.
pub struct GeminiEnhancer {
    client: ai_client::GeminiClient,
}

impl GeminiEnhancer {
    pub fn new(client: ai_client::GeminiClient) -> Self {
        Self { client }
    }

    /// Build from `GEMINI_API_KEY`. Returns `None` (not an error) when
    /// the credential is absent, so callers can degrade to the
    /// deterministic-only path; any other configuration problem is a
    /// real error.
    pub fn from_env() -> Result<Option<Self>, ai_client::AiClientError> {
        match ai_client::GeminiClient::from_env() {
            Ok(client) => Ok(Some(Self::new(client))),
            Err(ai_client::AiClientError::MissingCredential) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl Enhancer for GeminiEnhancer {
    async fn complete(&self, prompt: &str) -> Result<String, EnhancerError> {
        match self.client.generate(prompt).await {
            Ok(text) => Ok(text),
            Err(ai_client::AiClientError::EmptyResponse) => Err(EnhancerError::Empty),
            Err(e) => Err(EnhancerError::Provider(e.to_string())),
        }
    }
}
