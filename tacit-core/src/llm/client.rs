//! Fallback-chain completion client

use super::errors::{LLMError, LLMResult, ModelFailure};
use super::provider::{CompletionBackend, CompletionOptions};
use std::sync::Arc;
use tracing::{debug, warn};

/// Tries each model in an ordered list until one succeeds.
///
/// One attempt per model, no backoff, no second attempt against the same
/// model: the chain is the whole resilience policy. When every model
/// fails, the aggregated error enumerates each attempt and its reason.
pub struct GenerationClient {
    backend: Arc<dyn CompletionBackend>,
    models: Vec<String>,
}

impl GenerationClient {
    pub fn new(backend: Arc<dyn CompletionBackend>, models: Vec<String>) -> Self {
        Self { backend, models }
    }

    /// Ordered model identifiers this client will attempt
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Run one free-text completion, falling through the model chain
    pub async fn complete(&self, prompt: &str, options: &CompletionOptions) -> LLMResult<String> {
        let mut attempts: Vec<ModelFailure> = Vec::new();

        for model in &self.models {
            debug!(%model, backend = self.backend.name(), "attempting completion");
            match self.backend.complete(model, prompt, options).await {
                Ok(text) => {
                    if !attempts.is_empty() {
                        debug!(%model, failed_before = attempts.len(), "fallback model succeeded");
                    }
                    return Ok(text);
                }
                // a missing credential is fatal at first use; trying more
                // models cannot fix it
                Err(err @ LLMError::Configuration { .. }) => return Err(err),
                Err(err) => {
                    warn!(%model, error = %err, "model attempt failed, trying next");
                    attempts.push(ModelFailure { model: model.clone(), message: err.to_string() });
                }
            }
        }

        Err(LLMError::AllModelsFailed { attempts })
    }
}
