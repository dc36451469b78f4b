//! Anthropic messages API backend

use super::config::LLMConfig;
use super::errors::{LLMError, LLMResult};
use super::provider::{CompletionBackend, CompletionOptions};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// HTTP backend for Anthropic's messages API.
///
/// Makes exactly one attempt per call; the fallback chain in
/// [`GenerationClient`](super::client::GenerationClient) decides what
/// happens on failure. The request timeout lives here, not in the
/// pipeline.
pub struct AnthropicBackend {
    client: Client,
    config: LLMConfig,
}

impl AnthropicBackend {
    pub fn new(config: LLMConfig) -> LLMResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| LLMError::network(err.to_string()))?;
        Ok(Self { client, config })
    }

    fn api_key(&self) -> LLMResult<String> {
        std::env::var(&self.config.api_key_env).map_err(|_| {
            LLMError::config(format!("API key not found in {}", self.config.api_key_env))
        })
    }
}

#[derive(Debug, Serialize)]
struct MessageRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: usize,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Vec<Content>,
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

#[async_trait]
impl CompletionBackend for AnthropicBackend {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn complete(
        &self,
        model: &str,
        prompt: &str,
        options: &CompletionOptions,
    ) -> LLMResult<String> {
        let api_key = self.api_key()?;

        let request = MessageRequest {
            model,
            messages: vec![Message { role: "user", content: prompt }],
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            system: options.system_prompt.as_deref(),
        };

        debug!(model, prompt_len = prompt.len(), "sending completion request");
        let response = self
            .client
            .post(format!("{}/v1/messages", self.config.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(LLMError::api(status, message));
        }

        let result: MessageResponse = response
            .json()
            .await
            .map_err(|err| LLMError::malformed(err.to_string()))?;

        match result.stop_reason.as_deref() {
            Some("max_tokens") => {
                return Err(LLMError::content_filtered("response truncated at max_tokens"));
            }
            Some("refusal") => {
                return Err(LLMError::content_filtered("provider refused the request"));
            }
            _ => {}
        }

        result
            .content
            .first()
            .map(|content| match content {
                Content::Text { text } => text.clone(),
            })
            .ok_or_else(|| LLMError::malformed("response contained no text content"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization_skips_absent_system() {
        let request = MessageRequest {
            model: "claude-3-5-haiku-20241022",
            messages: vec![Message { role: "user", content: "hello" }],
            max_tokens: 128,
            temperature: 0.3,
            system: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("system").is_none());
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn test_response_text_extraction() {
        let json = r#"{
            "content": [{"type": "text", "text": "segmented"}],
            "stop_reason": "end_turn"
        }"#;
        let response: MessageResponse = serde_json::from_str(json).unwrap();
        let Content::Text { text } = &response.content[0];
        assert_eq!(text, "segmented");
    }
}
