//! Provider boundary for free-text completion

use super::errors::LLMResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_MAX_TOKENS: usize = 4096;

/// Options for a single completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    pub max_tokens: usize,
    pub temperature: f32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            system_prompt: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Executes one completion request against one concrete model.
///
/// Implementations make a single attempt per call; trying the next model
/// on failure belongs to [`GenerationClient`](super::client::GenerationClient).
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Name of this backend
    fn name(&self) -> &str;

    /// Run one completion request and return the response text
    async fn complete(
        &self,
        model: &str,
        prompt: &str,
        options: &CompletionOptions,
    ) -> LLMResult<String>;
}
