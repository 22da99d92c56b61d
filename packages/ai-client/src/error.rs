//! Typed errors for the Gemini client.

use thiserror::Error;

/// Errors from talking to the Gemini API.
#[derive(Debug, Error)]
pub enum AiClientError {
    /// No API key available at construction time
    #[error("GEMINI_API_KEY not set")]
    MissingCredential,

    /// Transport-level failure
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// A success response carried no usable text
    #[error("empty completion")]
    EmptyResponse,
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, AiClientError>;
