//! Stage contracts
//!
//! Each stage defines a request builder and a response parser against a
//! fixed textual protocol: labeled JSON blocks out, XML-style named
//! blocks (or literal markdown headings, for the renderer) back in.

pub mod extractor;
pub mod renderer;
pub mod segmenter;

use crate::llm::CompletionOptions;

/// A fully built stage request, ready for the generation client
#[derive(Debug, Clone)]
pub struct StageRequest {
    pub system_prompt: String,
    pub prompt: String,
    pub max_tokens: usize,
}

impl StageRequest {
    pub fn options(&self) -> CompletionOptions {
        CompletionOptions {
            system_prompt: Some(self.system_prompt.clone()),
            max_tokens: self.max_tokens,
            ..CompletionOptions::default()
        }
    }
}
