//! Stage 1: interpretive segmentation of the action stream
//!
//! Receives the full actions, their metrics, and the deterministic
//! boundary proposals as hints; returns semantically labeled chunks. A
//! response without a parseable `<chunks>` block degrades to an empty
//! chunk list instead of failing the stage.

use super::StageRequest;
use crate::analysis::{PreChunk, TaskMetrics};
use crate::capture::Action;
use crate::docgen::types::ActionChunk;
use crate::docgen::{StageOutcome, extract, format};
use serde::Deserialize;
use tracing::warn;

const MAX_TOKENS: usize = 4096;

const SYSTEM_PROMPT: &str = "\
You segment a recorded browser work session into task phases.

You are given the ordered list of captured actions, derived metrics \
(pauses, revisit loops, repeated actions, extractions), and a list of \
rule-based boundary proposals. The proposals are hints only; group \
actions by what the user was accomplishing, not by mechanical \
transitions.

Respond with a single <chunks> block containing a JSON array. Each \
element must have: \"phase\" (short label), \"startIndex\" and \
\"endIndex\" (inclusive, into the actions array), \"patterns\" (notable \
behavioral patterns inside the span), and \"inferredIntent\" (one \
sentence on what the user was trying to do). Chunks must be contiguous \
and cover every action.

Example:
<chunks>
[{\"phase\": \"locate record\", \"startIndex\": 0, \"endIndex\": 4, \
\"patterns\": [\"back-and-forth between list and detail\"], \
\"inferredIntent\": \"Find the right customer record.\"}]
</chunks>";

/// Build the segmenter request from the raw stream and its analysis
pub fn build_request(
    actions: &[Action],
    metrics: &TaskMetrics,
    prechunks: &[PreChunk],
) -> StageRequest {
    let prompt = format::join_blocks(&[
        format::actions_block(actions),
        format::metrics_block(metrics),
        format::prechunks_block(prechunks),
    ]);
    StageRequest { system_prompt: SYSTEM_PROMPT.to_string(), prompt, max_tokens: MAX_TOKENS }
}

/// Chunk fields as the model returns them; actions are attached locally
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireChunk {
    phase: String,
    start_index: usize,
    end_index: usize,
    #[serde(default)]
    patterns: Vec<String>,
    #[serde(default)]
    inferred_intent: String,
}

/// Parse the segmenter response.
///
/// Validation is structural only: an array of objects with the required
/// fields. Contiguity and coverage are not re-checked against the
/// deterministic pre-chunks.
pub fn parse_response(response: &str, actions: &[Action]) -> StageOutcome<Vec<ActionChunk>> {
    let Some(block) = extract::tagged_block(response, "chunks") else {
        warn!("segmenter response had no <chunks> block");
        return StageOutcome::Degraded(Vec::new());
    };

    match serde_json::from_str::<Vec<WireChunk>>(block) {
        Ok(wire) => StageOutcome::Parsed(
            wire.into_iter().map(|chunk| attach_actions(chunk, actions)).collect(),
        ),
        Err(err) => {
            warn!(error = %err, "segmenter returned malformed chunk JSON");
            StageOutcome::Degraded(Vec::new())
        }
    }
}

/// Clamp the model's indices into range and attach the action slice
fn attach_actions(wire: WireChunk, actions: &[Action]) -> ActionChunk {
    if actions.is_empty() {
        return ActionChunk {
            phase: wire.phase,
            start_index: 0,
            end_index: 0,
            actions: Vec::new(),
            patterns: wire.patterns,
            inferred_intent: wire.inferred_intent,
        };
    }

    let last = actions.len() - 1;
    let start_index = wire.start_index.min(last);
    let end_index = wire.end_index.min(last).max(start_index);
    ActionChunk {
        phase: wire.phase,
        start_index,
        end_index,
        actions: actions[start_index..=end_index].to_vec(),
        patterns: wire.patterns,
        inferred_intent: wire.inferred_intent,
    }
}
