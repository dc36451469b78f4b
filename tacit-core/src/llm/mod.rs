//! Text-generation client with ordered model fallback
//!
//! One backend (the external provider boundary) plus the fallback-chain
//! client that is the system's sole resilience mechanism: each model in
//! the ordered list gets exactly one attempt, the first success wins,
//! and total failure surfaces every attempt in one aggregated error.
//! The backend is constructor-injected so the pipeline stays testable
//! with a substitutable fake.

pub mod anthropic;
pub mod client;
pub mod config;
pub mod errors;
pub mod mock;
pub mod provider;

pub use anthropic::AnthropicBackend;
pub use client::GenerationClient;
pub use config::LLMConfig;
pub use errors::{LLMError, LLMResult, ModelFailure};
pub use provider::{CompletionBackend, CompletionOptions};
