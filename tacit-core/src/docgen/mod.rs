//! Three-stage task-documentation pipeline
//!
//! Stage 1 segments the action stream into labeled phases, stage 2
//! extracts tacit know-how from the segments, stage 3 renders the final
//! markdown document. Stages run strictly in sequence, each consuming
//! the previous stage's parsed output. Only generation-call failures are
//! fatal; a structurally malformed stage response degrades to an empty
//! structure and the pipeline keeps going.

pub mod extract;
pub mod format;
pub mod orchestrator;
pub mod stages;
pub mod types;

pub use orchestrator::DocumentationPipeline;
pub use types::{
    ActionChunk, CornerCase, DecisionCriterion, GeneratedOutput, GenerationResult,
    KnowHowExtraction,
};

use crate::llm::LLMError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The three generation stages, in execution order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Segmenter,
    Extractor,
    Renderer,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Segmenter => "segmenter",
            Stage::Extractor => "extractor",
            Stage::Renderer => "renderer",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The generation call for a stage failed after exhausting the model
    /// chain; the run is aborted with no partial result
    #[error("{stage} stage failed: {source}")]
    Stage { stage: Stage, source: LLMError },
}

impl PipelineError {
    /// Which stage aborted the run
    pub fn stage(&self) -> Stage {
        match self {
            Self::Stage { stage, .. } => *stage,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Parse result of a stage response.
///
/// `Degraded` carries the stage's empty default after a structural parse
/// failure; downstream stages consume both variants the same way, but
/// the distinction keeps "the provider said there was nothing" apart
/// from "the provider's response was unparsable".
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome<T> {
    Parsed(T),
    Degraded(T),
}

impl<T> StageOutcome<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Parsed(value) | Self::Degraded(value) => value,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display_names() {
        assert_eq!(Stage::Segmenter.to_string(), "segmenter");
        assert_eq!(Stage::Renderer.to_string(), "renderer");
    }

    #[test]
    fn test_pipeline_error_carries_stage_and_cause() {
        let err = PipelineError::Stage {
            stage: Stage::Extractor,
            source: LLMError::network("connection reset"),
        };
        assert_eq!(err.stage(), Stage::Extractor);
        let text = err.to_string();
        assert!(text.contains("extractor"));
        assert!(text.contains("connection reset"));
    }
}
