//! Core functionality for tacit
//!
//! Turns a raw, timestamped stream of captured browser interactions into
//! detected behavioral patterns and a structured, human-readable task
//! document, produced via a three-stage text-generation pipeline.

pub mod analysis;
pub mod capture;
pub mod docgen;
pub mod llm;
pub mod session;

pub use analysis::{compute_metrics, pre_chunk};
pub use docgen::{DocumentationPipeline, GenerationResult};
pub use llm::GenerationClient;
