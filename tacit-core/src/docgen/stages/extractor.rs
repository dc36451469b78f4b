//! Stage 2: tacit-knowledge extraction
//!
//! Receives the labeled chunks (with a small action sample each), the
//! full action list, and the metrics; returns the structured know-how
//! the user never stated out loud. Malformed structured output degrades
//! to an all-empty extraction.

use super::StageRequest;
use crate::analysis::TaskMetrics;
use crate::capture::Action;
use crate::docgen::types::{ActionChunk, KnowHowExtraction};
use crate::docgen::{StageOutcome, extract, format};
use tracing::warn;

const MAX_TOKENS: usize = 4096;

const SYSTEM_PROMPT: &str = "\
You extract tacit knowledge from a segmented browser work session: the \
decision rules, signals and shortcuts an expert applies without saying \
so.

You are given the task phases, the full action list, and derived \
metrics. Look for: what the user checked before acting, what made them \
back out or retry, which fields they always filled, and where they \
deviated from the obvious path.

Respond with a single <know_how_extraction> block containing one JSON \
object with these keys: \"decisionCriteria\" (array of {\"situation\", \
\"criterion\", \"sourcePattern\", \"confidence\"}), \"successSignals\", \
\"failureSignals\", \"criticalFields\", \"cornerCases\" (array of \
{\"situation\", \"resolution\", \"sourceEvidence\"}), and \
\"expertShortcuts\". Only include decision criteria you are at least \
0.7 confident in; omit the rest entirely.";

/// Build the extractor request from the previous stage's chunks
pub fn build_request(
    chunks: &[ActionChunk],
    actions: &[Action],
    metrics: &TaskMetrics,
) -> StageRequest {
    let prompt = format::join_blocks(&[
        format::chunks_block(chunks),
        format::actions_block(actions),
        format::metrics_block(metrics),
    ]);
    StageRequest { system_prompt: SYSTEM_PROMPT.to_string(), prompt, max_tokens: MAX_TOKENS }
}

/// Parse the extractor response; structural validation only
pub fn parse_response(response: &str) -> StageOutcome<KnowHowExtraction> {
    let Some(block) = extract::tagged_block(response, "know_how_extraction") else {
        warn!("extractor response had no <know_how_extraction> block");
        return StageOutcome::Degraded(KnowHowExtraction::default());
    };

    match serde_json::from_str::<KnowHowExtraction>(block) {
        Ok(know_how) => StageOutcome::Parsed(know_how),
        Err(err) => {
            warn!(error = %err, "extractor returned malformed know-how JSON");
            StageOutcome::Degraded(KnowHowExtraction::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::compute_metrics;
    use crate::capture::ActionType;
    use crate::capture::fixtures::action;

    fn chunk(actions: Vec<Action>) -> ActionChunk {
        ActionChunk {
            phase: "verify".to_string(),
            start_index: 0,
            end_index: actions.len().saturating_sub(1),
            actions,
            patterns: vec!["double-check".to_string()],
            inferred_intent: "Confirm the record matches.".to_string(),
        }
    }

    #[test]
    fn test_request_contains_chunks_actions_and_metrics() {
        let actions = vec![action(ActionType::Click, 0, "https://a.example")];
        let metrics = compute_metrics(&actions);
        let chunks = vec![chunk(actions.clone())];
        let request = build_request(&chunks, &actions, &metrics);
        assert!(request.prompt.contains("CHUNKS:"));
        assert!(request.prompt.contains("ACTIONS:"));
        assert!(request.prompt.contains("METRICS:"));
    }

    #[test]
    fn test_parse_valid_know_how() {
        let response = r#"<know_how_extraction>
{
  "decisionCriteria": [{
    "situation": "two similarly named customers",
    "criterion": "match on billing email, not display name",
    "sourcePattern": "back-and-forth between detail pages",
    "confidence": 0.85
  }],
  "successSignals": ["status badge turns green"],
  "failureSignals": [],
  "criticalFields": ["billing email"],
  "cornerCases": [],
  "expertShortcuts": ["search by invoice number instead of name"]
}
</know_how_extraction>"#;
        let outcome = parse_response(response);
        assert!(!outcome.is_degraded());
        let know_how = outcome.into_inner();
        assert_eq!(know_how.decision_criteria.len(), 1);
        assert!(know_how.decision_criteria[0].confidence >= 0.7);
        assert_eq!(know_how.expert_shortcuts.len(), 1);
    }

    #[test]
    fn test_partial_object_fills_missing_lists() {
        let response = r#"<know_how_extraction>{"successSignals": ["done"]}</know_how_extraction>"#;
        let know_how = parse_response(response).into_inner();
        assert_eq!(know_how.success_signals, vec!["done"]);
        assert!(know_how.decision_criteria.is_empty());
        assert!(know_how.corner_cases.is_empty());
    }

    #[test]
    fn test_missing_block_degrades_to_empty_extraction() {
        let outcome = parse_response("nothing structured here");
        assert!(outcome.is_degraded());
        assert_eq!(outcome.into_inner(), KnowHowExtraction::default());
    }

    #[test]
    fn test_malformed_json_degrades_to_empty_extraction() {
        let outcome = parse_response("<know_how_extraction>[oops</know_how_extraction>");
        assert!(outcome.is_degraded());
        assert_eq!(outcome.into_inner(), KnowHowExtraction::default());
    }
}
