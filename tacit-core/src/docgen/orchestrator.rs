//! Pipeline orchestrator
//!
//! Sequences the three generation stages, feeding each stage's parsed
//! output into the next. Stages run strictly one at a time; there is no
//! cross-stage retry, no checkpointing of partial progress, and no
//! cancellation mid-run. Resilience lives entirely in the generation
//! client's model fallback chain.

use super::stages::{StageRequest, extractor, renderer, segmenter};
use super::types::{GenerationResult, KnowHowExtraction};
use super::{PipelineError, Result, Stage};
use crate::analysis::{TaskMetrics, compute_metrics, pre_chunk};
use crate::capture::Action;
use crate::llm::GenerationClient;
use tracing::{debug, info, warn};

/// Markdown returned for a run with no captured actions
const EMPTY_RESULT_MARKDOWN: &str = "\
# Summary
No actions were captured for this task.

# Instructions

# Know-How
";

/// Runs the three-stage documentation pipeline over a finished action
/// list. The generation client is injected at construction.
pub struct DocumentationPipeline {
    client: GenerationClient,
}

impl DocumentationPipeline {
    pub fn new(client: GenerationClient) -> Self {
        Self { client }
    }

    /// Generate the task document for a finished action list.
    ///
    /// An empty list short-circuits to a fixed empty result without
    /// issuing any generation call. A generation-call failure aborts
    /// the whole run tagged with the failing stage; malformed stage
    /// output does not.
    pub async fn generate_documentation(&self, actions: &[Action]) -> Result<GenerationResult> {
        self.run(actions, None).await
    }

    /// Re-run the pipeline with clarification text folded into the
    /// final render. The previous output is replaced wholesale, never
    /// patched.
    pub async fn regenerate_documentation(
        &self,
        actions: &[Action],
        clarifications: &str,
    ) -> Result<GenerationResult> {
        self.run(actions, Some(clarifications)).await
    }

    async fn run(
        &self,
        actions: &[Action],
        clarifications: Option<&str>,
    ) -> Result<GenerationResult> {
        if actions.is_empty() {
            debug!("no actions captured, skipping generation");
            return Ok(empty_result());
        }

        let metrics = compute_metrics(actions);
        let prechunks = pre_chunk(actions);
        info!(
            actions = actions.len(),
            boundaries = prechunks.len(),
            "starting documentation pipeline"
        );

        let request = segmenter::build_request(actions, &metrics, &prechunks);
        let response = self.call(Stage::Segmenter, &request).await?;
        let chunks = self.settle(Stage::Segmenter, segmenter::parse_response(&response, actions));

        let request = extractor::build_request(&chunks, actions, &metrics);
        let response = self.call(Stage::Extractor, &request).await?;
        let know_how = self.settle(Stage::Extractor, extractor::parse_response(&response));

        let request = renderer::build_request(&chunks, &know_how, &metrics, clarifications);
        let response = self.call(Stage::Renderer, &request).await?;
        let output = self.settle(Stage::Renderer, renderer::parse_response(&response));

        info!(chunks = chunks.len(), "documentation pipeline completed");
        Ok(GenerationResult { chunks, metrics, know_how, output })
    }

    async fn call(&self, stage: Stage, request: &StageRequest) -> Result<String> {
        debug!(%stage, prompt_len = request.prompt.len(), "running stage");
        self.client
            .complete(&request.prompt, &request.options())
            .await
            .map_err(|source| PipelineError::Stage { stage, source })
    }

    fn settle<T>(&self, stage: Stage, outcome: super::StageOutcome<T>) -> T {
        if outcome.is_degraded() {
            warn!(%stage, "stage output degraded to its empty structure");
        }
        outcome.into_inner()
    }
}

fn empty_result() -> GenerationResult {
    GenerationResult {
        chunks: Vec::new(),
        metrics: TaskMetrics::default(),
        know_how: KnowHowExtraction::default(),
        output: renderer::parse_response(EMPTY_RESULT_MARKDOWN).into_inner(),
    }
}
