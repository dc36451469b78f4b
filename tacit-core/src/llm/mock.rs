//! Scripted completion backend for unit tests
//!
//! Returns queued responses and errors in order and records every call,
//! so fallback behavior and stage sequencing can be asserted without a
//! provider. Not available in production builds.

#![cfg(test)]

use super::errors::LLMResult;
use super::provider::{CompletionBackend, CompletionOptions};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One recorded call to the mock backend
#[derive(Debug, Clone)]
pub struct MockCall {
    pub model: String,
    pub prompt: String,
    pub system_prompt: Option<String>,
}

#[derive(Clone, Default)]
pub struct MockBackend {
    script: Arc<Mutex<VecDeque<LLMResult<String>>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response
    pub fn push_ok(&self, text: &str) {
        self.script.lock().unwrap().push_back(Ok(text.to_string()));
    }

    /// Queue an error
    pub fn push_err(&self, err: super::errors::LLMError) {
        self.script.lock().unwrap().push_back(Err(err));
    }

    /// Calls made so far, in order
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(
        &self,
        model: &str,
        prompt: &str,
        options: &CompletionOptions,
    ) -> LLMResult<String> {
        self.calls.lock().unwrap().push(MockCall {
            model: model.to_string(),
            prompt: prompt.to_string(),
            system_prompt: options.system_prompt.clone(),
        });

        // an exhausted script answers with empty text
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}
