//! Data model produced by the generation stages
//!
//! Everything here is created once per generation run from a finished
//! action list and never mutated field by field afterwards; a
//! regeneration replaces the output wholesale.

use crate::analysis::TaskMetrics;
use crate::capture::Action;
use serde::{Deserialize, Serialize};

/// Semantically labeled span of the action sequence, produced by the
/// segmenter stage. Same contiguity and coverage expectations as the
/// deterministic pre-chunks, which are only advisory input to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActionChunk {
    pub phase: String,
    pub start_index: usize,
    pub end_index: usize,
    /// Attached locally from the session's actions, not returned by the model
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub inferred_intent: String,
}

/// A tacit decision rule inferred from the action patterns
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DecisionCriterion {
    pub situation: String,
    pub criterion: String,
    pub source_pattern: String,
    /// Producer contract: criteria below 0.7 are excluded upstream and
    /// not re-validated here
    pub confidence: f64,
}

/// An observed exception and how the user resolved it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CornerCase {
    pub situation: String,
    pub resolution: String,
    pub source_evidence: String,
}

/// Tacit knowledge extracted from the segmented action stream
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct KnowHowExtraction {
    pub decision_criteria: Vec<DecisionCriterion>,
    pub success_signals: Vec<String>,
    pub failure_signals: Vec<String>,
    pub critical_fields: Vec<String>,
    pub corner_cases: Vec<CornerCase>,
    pub expert_shortcuts: Vec<String>,
}

/// Rendered task document.
///
/// `raw_markdown` is the single source of truth; the three prose fields
/// are views sliced out of it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedOutput {
    pub summary: String,
    pub instructions: String,
    pub know_how: String,
    pub raw_markdown: String,
}

/// Everything a completed generation run returns to the caller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub chunks: Vec<ActionChunk>,
    pub metrics: TaskMetrics,
    pub know_how: KnowHowExtraction,
    pub output: GeneratedOutput,
}
