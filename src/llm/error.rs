use std::time::Duration;

use thiserror::Error;

/// Errors raised by an [`LlmClient`](super::LlmClient).
///
/// None of these reach the caller of an analyzer: [`Llm::ask`](super::Llm::ask)
/// logs them and falls back.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key not found in environment variable {0}")]
    MissingApiKey(String),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}
