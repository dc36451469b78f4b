//! Stage payload formatting
//!
//! Pure serializers turning actions, metrics, chunks and know-how into
//! the labeled JSON blocks each stage's user payload is assembled from.

use super::types::{ActionChunk, KnowHowExtraction};
use crate::analysis::{PreChunk, TaskMetrics};
use crate::capture::Action;
use serde::Serialize;

pub(crate) const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// Representative actions included per chunk in the extractor payload
const CHUNK_SAMPLE_ACTIONS: usize = 3;

/// One labeled JSON block. Serialization of these derived types cannot
/// fail; `null` stands in if it ever does.
fn json_block<T: Serialize + ?Sized>(label: &str, value: &T) -> String {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string());
    format!("{label}:\n{json}")
}

pub(crate) fn actions_block(actions: &[Action]) -> String {
    json_block("ACTIONS", actions)
}

pub(crate) fn metrics_block(metrics: &TaskMetrics) -> String {
    json_block("METRICS", metrics)
}

pub(crate) fn prechunks_block(prechunks: &[PreChunk]) -> String {
    // indices and boundary labels only; the full actions are already in
    // their own block
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct BoundaryHint<'a> {
        start_index: usize,
        end_index: usize,
        boundary: &'a crate::analysis::Boundary,
    }

    let hints: Vec<BoundaryHint<'_>> = prechunks
        .iter()
        .map(|chunk| BoundaryHint {
            start_index: chunk.start_index,
            end_index: chunk.end_index,
            boundary: &chunk.boundary,
        })
        .collect();
    json_block("PROPOSED_BOUNDARIES", &hints)
}

/// Chunks with at most [`CHUNK_SAMPLE_ACTIONS`] representative actions each
pub(crate) fn chunks_block(chunks: &[ActionChunk]) -> String {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct ChunkDigest<'a> {
        phase: &'a str,
        start_index: usize,
        end_index: usize,
        patterns: &'a [String],
        inferred_intent: &'a str,
        sample_actions: &'a [Action],
    }

    let digests: Vec<ChunkDigest<'_>> = chunks
        .iter()
        .map(|chunk| ChunkDigest {
            phase: &chunk.phase,
            start_index: chunk.start_index,
            end_index: chunk.end_index,
            patterns: &chunk.patterns,
            inferred_intent: &chunk.inferred_intent,
            sample_actions: &chunk.actions[..chunk.actions.len().min(CHUNK_SAMPLE_ACTIONS)],
        })
        .collect();
    json_block("CHUNKS", &digests)
}

pub(crate) fn know_how_block(know_how: &KnowHowExtraction) -> String {
    json_block("KNOW_HOW", know_how)
}

/// Join labeled blocks with the plain-text section separator
pub(crate) fn join_blocks(blocks: &[String]) -> String {
    blocks.join(SECTION_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{compute_metrics, pre_chunk};
    use crate::capture::ActionType;
    use crate::capture::fixtures::action;

    fn sample_actions() -> Vec<Action> {
        vec![
            action(ActionType::Navigation, 0, "https://a.example/list"),
            action(ActionType::Click, 1, "https://a.example/list"),
            action(ActionType::Copy, 2, "https://a.example/list"),
        ]
    }

    #[test]
    fn test_blocks_are_labeled_json() {
        let actions = sample_actions();
        let block = actions_block(&actions);
        assert!(block.starts_with("ACTIONS:\n"));
        let json: serde_json::Value =
            serde_json::from_str(block.strip_prefix("ACTIONS:\n").unwrap()).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_prechunk_hints_carry_no_actions() {
        let actions = sample_actions();
        let block = prechunks_block(&pre_chunk(&actions));
        assert!(block.contains("startIndex"));
        assert!(block.contains("boundary"));
        assert!(!block.contains("\"actions\""));
    }

    #[test]
    fn test_chunk_digest_caps_sample_actions() {
        let actions: Vec<Action> = (0..6)
            .map(|i| action(ActionType::Click, i, "https://a.example"))
            .collect();
        let chunk = ActionChunk {
            phase: "fill form".to_string(),
            start_index: 0,
            end_index: 5,
            actions,
            patterns: vec![],
            inferred_intent: String::new(),
        };
        let block = chunks_block(std::slice::from_ref(&chunk));
        let json: serde_json::Value =
            serde_json::from_str(block.strip_prefix("CHUNKS:\n").unwrap()).unwrap();
        assert_eq!(json[0]["sampleActions"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_join_blocks_uses_separator() {
        let actions = sample_actions();
        let payload = join_blocks(&[
            actions_block(&actions),
            metrics_block(&compute_metrics(&actions)),
        ]);
        assert!(payload.contains(SECTION_SEPARATOR));
        assert!(payload.contains("ACTIONS:"));
        assert!(payload.contains("METRICS:"));
    }
}
