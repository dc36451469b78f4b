//! Error types for generation-client operations

use thiserror::Error;

/// One failed model attempt inside the fallback chain
#[derive(Debug, Clone)]
pub struct ModelFailure {
    pub model: String,
    pub message: String,
}

/// Main error type for generation-client operations
#[derive(Debug, Error)]
pub enum LLMError {
    /// Missing credential or invalid configuration; fatal at first use
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Transport-level failure talking to the provider
    #[error("Network error: {message}")]
    Network { message: String },

    /// Provider returned a non-success status
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Provider signaled content filtering or truncation
    #[error("Content filtered: {reason}")]
    ContentFiltered { reason: String },

    /// Provider response did not have the expected shape
    #[error("Malformed provider response: {message}")]
    MalformedResponse { message: String },

    /// Every model in the fallback chain failed
    #[error("all models failed: {}", render_attempts(.attempts))]
    AllModelsFailed { attempts: Vec<ModelFailure> },
}

fn render_attempts(attempts: &[ModelFailure]) -> String {
    if attempts.is_empty() {
        return "no models configured".to_string();
    }
    attempts
        .iter()
        .map(|attempt| format!("{}: {}", attempt.model, attempt.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl LLMError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into() }
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api { status, message: message.into() }
    }

    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered { reason: reason.into() }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse { message: message.into() }
    }
}

/// Result type for generation-client operations
pub type LLMResult<T> = Result<T, LLMError>;

impl From<reqwest::Error> for LLMError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network { message: err.to_string() }
    }
}

impl From<serde_json::Error> for LLMError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse { message: err.to_string() }
    }
}
