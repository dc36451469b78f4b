//! Stage 3: document rendering
//!
//! Receives the chunks, the extracted know-how, and the metrics;
//! returns free markdown expected to contain literal `# Summary`,
//! `# Instructions` and `# Know-How` sections. A missing heading yields
//! an empty field, not an error; the full response text is always kept
//! as the source of truth.

use super::StageRequest;
use crate::analysis::TaskMetrics;
use crate::docgen::types::{ActionChunk, GeneratedOutput, KnowHowExtraction};
use crate::docgen::{StageOutcome, extract, format};
use tracing::warn;

const MAX_TOKENS: usize = 8192;

pub(crate) const SUMMARY_HEADING: &str = "# Summary";
pub(crate) const INSTRUCTIONS_HEADING: &str = "# Instructions";
pub(crate) const KNOW_HOW_HEADING: &str = "# Know-How";

const SYSTEM_PROMPT: &str = "\
You write a task document from a segmented browser work session and the \
tacit knowledge extracted from it, so that someone else can perform the \
same task.

Respond with markdown containing exactly these three top-level \
sections, in this order:

# Summary
Two or three sentences on what the task accomplishes.

# Instructions
Numbered steps a newcomer can follow, one phase per group of steps.

# Know-How
The decision criteria, signals, corner cases and shortcuts, written as \
practical advice.

Do not add other top-level headings and do not wrap the document in a \
code fence.";

/// Build the renderer request; `clarifications` carries follow-up
/// answers when the document is being regenerated
pub fn build_request(
    chunks: &[ActionChunk],
    know_how: &KnowHowExtraction,
    metrics: &TaskMetrics,
    clarifications: Option<&str>,
) -> StageRequest {
    let mut blocks = vec![
        format::chunks_block(chunks),
        format::know_how_block(know_how),
        format::metrics_block(metrics),
    ];
    if let Some(clarifications) = clarifications {
        blocks.push(format!("CLARIFICATIONS:\n{clarifications}"));
    }
    StageRequest {
        system_prompt: SYSTEM_PROMPT.to_string(),
        prompt: format::join_blocks(&blocks),
        max_tokens: MAX_TOKENS,
    }
}

/// Slice the three headed sections out of the response.
///
/// `Degraded` when any heading is absent; the corresponding field is
/// empty but `raw_markdown` still carries the whole response.
pub fn parse_response(response: &str) -> StageOutcome<GeneratedOutput> {
    let summary = extract::markdown_section(response, SUMMARY_HEADING);
    let instructions = extract::markdown_section(response, INSTRUCTIONS_HEADING);
    let know_how = extract::markdown_section(response, KNOW_HOW_HEADING);

    let degraded = summary.is_none() || instructions.is_none() || know_how.is_none();
    if degraded {
        warn!("renderer response was missing at least one expected heading");
    }

    let output = GeneratedOutput {
        summary: summary.unwrap_or_default().to_string(),
        instructions: instructions.unwrap_or_default().to_string(),
        know_how: know_how.unwrap_or_default().to_string(),
        raw_markdown: response.to_string(),
    };

    if degraded { StageOutcome::Degraded(output) } else { StageOutcome::Parsed(output) }
}
