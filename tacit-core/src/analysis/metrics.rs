//! Aggregate statistics and flagged patterns for one action stream
//!
//! `compute_metrics` is total and recomputes everything wholesale from
//! the ordered action list; metrics are never patched incrementally.

use super::host_of;
use crate::capture::{Action, ActionType};
use serde::{Deserialize, Serialize};

/// Idle time at or above this counts as a long pause
pub const LONG_PAUSE_THRESHOLD_MS: u64 = 10_000;

/// Minimum run length for a repeated-action pattern
const REPEAT_RUN_MIN_LEN: usize = 3;

/// Back-and-forth detection only sees this many recent distinct URL
/// visits; older revisits roll off and are invisible
const URL_HISTORY_WINDOW: usize = 10;

/// Cap on the target-text portion of an extraction context string
const EXTRACTION_TEXT_MAX_LEN: usize = 80;

/// A pause of at least [`LONG_PAUSE_THRESHOLD_MS`] before an action
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LongPause {
    pub index: usize,
    pub duration_ms: u64,
}

/// A revisit loop: the user returned to a URL seen within the recent
/// visit window; `indices` spans from the earlier occurrence through
/// every intermediate visit up to the return
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackForthPattern {
    pub url: String,
    pub indices: Vec<usize>,
}

/// A maximal contiguous run of 3+ actions of the same type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RepeatedActionInfo {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub count: usize,
    pub indices: Vec<usize>,
}

/// A copy action with a short free-text description of what was copied
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionAction {
    pub index: usize,
    pub context: String,
}

/// Derived statistics for a finished action list.
///
/// An empty action list produces all-zero counts and empty lists, never
/// absent fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskMetrics {
    pub total_actions: usize,
    pub total_duration_ms: u64,
    pub long_pauses: Vec<LongPause>,
    pub back_forth_patterns: Vec<BackForthPattern>,
    pub repeated_actions: Vec<RepeatedActionInfo>,
    pub extraction_actions: Vec<ExtractionAction>,
    pub url_changes: usize,
    pub unique_domains: Vec<String>,
}

/// Compute all metrics from an ordered action list
pub fn compute_metrics(actions: &[Action]) -> TaskMetrics {
    let (Some(first), Some(last)) = (actions.first(), actions.last()) else {
        return TaskMetrics::default();
    };

    TaskMetrics {
        total_actions: actions.len(),
        total_duration_ms: last.timestamp.saturating_sub(first.timestamp),
        long_pauses: detect_long_pauses(actions),
        back_forth_patterns: detect_back_forth(actions),
        repeated_actions: detect_repeated_runs(actions),
        extraction_actions: collect_extractions(actions),
        url_changes: count_url_changes(actions),
        unique_domains: collect_domains(actions),
    }
}

fn detect_long_pauses(actions: &[Action]) -> Vec<LongPause> {
    actions
        .iter()
        .enumerate()
        .filter_map(|(index, action)| {
            let idle = action.metadata.idle_time_before?;
            (idle >= LONG_PAUSE_THRESHOLD_MS).then_some(LongPause { index, duration_ms: idle })
        })
        .collect()
}

/// Sliding-window revisit detection over the last [`URL_HISTORY_WINDOW`]
/// distinct `(url, index)` visits. Only the nearest qualifying prior
/// occurrence is considered, and the immediately preceding visit never
/// qualifies (that is just staying on a page, not returning to it).
fn detect_back_forth(actions: &[Action]) -> Vec<BackForthPattern> {
    let mut patterns = Vec::new();
    let mut visits: Vec<(&str, usize)> = Vec::new();

    for (index, action) in actions.iter().enumerate() {
        let on_new_url = visits.last().is_none_or(|(url, _)| *url != action.url);
        if !on_new_url {
            continue;
        }

        if visits.len() >= 2 {
            let earlier = visits[..visits.len() - 1]
                .iter()
                .rposition(|(url, _)| *url == action.url);
            if let Some(pos) = earlier {
                let mut indices: Vec<usize> = visits[pos..].iter().map(|(_, i)| *i).collect();
                indices.push(index);
                patterns.push(BackForthPattern { url: action.url.clone(), indices });
            }
        }

        visits.push((&action.url, index));
        if visits.len() > URL_HISTORY_WINDOW {
            visits.remove(0);
        }
    }

    patterns
}

/// Runs are by type only, not by target: three consecutive clicks on
/// different elements still count.
fn detect_repeated_runs(actions: &[Action]) -> Vec<RepeatedActionInfo> {
    let mut runs = Vec::new();
    let mut start = 0;

    while start < actions.len() {
        let mut end = start + 1;
        while end < actions.len() && actions[end].action_type == actions[start].action_type {
            end += 1;
        }
        if end - start >= REPEAT_RUN_MIN_LEN {
            runs.push(RepeatedActionInfo {
                action_type: actions[start].action_type,
                count: end - start,
                indices: (start..end).collect(),
            });
        }
        start = end;
    }

    runs
}

fn collect_extractions(actions: &[Action]) -> Vec<ExtractionAction> {
    actions
        .iter()
        .enumerate()
        .filter(|(_, action)| action.action_type == ActionType::Copy)
        .map(|(index, action)| ExtractionAction { index, context: extraction_context(action) })
        .collect()
}

fn extraction_context(action: &Action) -> String {
    let title = action.metadata.page_title.trim();
    let text = truncate(action.target.text.trim(), EXTRACTION_TEXT_MAX_LEN);
    match (title.is_empty(), text.is_empty()) {
        (false, false) => format!("{title}: {text}"),
        (false, true) => title.to_string(),
        _ => text,
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push('…');
    truncated
}

/// String inequality against the previous URL, not domain inequality
fn count_url_changes(actions: &[Action]) -> usize {
    actions.windows(2).filter(|pair| pair[0].url != pair[1].url).count()
}

/// Distinct hostnames in first-seen order; malformed URLs are skipped
/// here but still count toward `url_changes`
fn collect_domains(actions: &[Action]) -> Vec<String> {
    let mut domains: Vec<String> = Vec::new();
    for action in actions {
        let Some(host) = host_of(&action.url) else { continue };
        if !domains.contains(&host) {
            domains.push(host);
        }
    }
    domains
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::fixtures::{action, with_idle, with_page};

    fn nav(timestamp: u64, url: &str) -> Action {
        action(ActionType::Navigation, timestamp, url)
    }

    #[test]
    fn test_empty_actions_give_zeroed_metrics() {
        let metrics = compute_metrics(&[]);
        assert_eq!(metrics, TaskMetrics::default());
        assert_eq!(metrics.total_actions, 0);
        assert!(metrics.long_pauses.is_empty());
        assert!(metrics.unique_domains.is_empty());
    }

    #[test]
    fn test_total_duration_spans_first_to_last() {
        let actions = vec![nav(1_000, "https://a.example"), nav(61_000, "https://a.example/x")];
        let metrics = compute_metrics(&actions);
        assert_eq!(metrics.total_duration_ms, 60_000);
    }

    #[test]
    fn test_long_pause_threshold_is_inclusive() {
        let actions = vec![
            nav(0, "https://a.example"),
            with_idle(nav(9_000, "https://a.example/1"), 9_000),
            with_idle(nav(21_000, "https://a.example/2"), 12_000),
            with_idle(nav(31_000, "https://a.example/3"), 10_000),
        ];
        let metrics = compute_metrics(&actions);
        assert_eq!(metrics.long_pauses.len(), 2);
        assert_eq!(metrics.long_pauses[0], LongPause { index: 2, duration_ms: 12_000 });
        assert_eq!(metrics.long_pauses[1], LongPause { index: 3, duration_ms: 10_000 });
    }

    #[test]
    fn test_back_forth_a_b_a() {
        let actions = vec![
            nav(0, "https://a.example/list"),
            nav(1, "https://a.example/detail"),
            nav(2, "https://a.example/list"),
        ];
        let metrics = compute_metrics(&actions);
        assert_eq!(metrics.back_forth_patterns.len(), 1);
        let pattern = &metrics.back_forth_patterns[0];
        assert_eq!(pattern.url, "https://a.example/list");
        assert_eq!(pattern.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_back_forth_ignores_staying_on_same_url() {
        let actions = vec![
            nav(0, "https://a.example"),
            action(ActionType::Click, 1, "https://a.example"),
            action(ActionType::Scroll, 2, "https://a.example"),
        ];
        let metrics = compute_metrics(&actions);
        assert!(metrics.back_forth_patterns.is_empty());
    }

    #[test]
    fn test_back_forth_nearest_occurrence_wins() {
        // A B A B: the final B pairs with the B at index 1, not further back
        let actions = vec![
            nav(0, "https://a.example/a"),
            nav(1, "https://a.example/b"),
            nav(2, "https://a.example/a"),
            nav(3, "https://a.example/b"),
        ];
        let metrics = compute_metrics(&actions);
        assert_eq!(metrics.back_forth_patterns.len(), 2);
        assert_eq!(metrics.back_forth_patterns[0].indices, vec![0, 1, 2]);
        assert_eq!(metrics.back_forth_patterns[1].indices, vec![1, 2, 3]);
    }

    #[test]
    fn test_back_forth_window_rolls_off_old_visits() {
        // Visit 12 distinct URLs, then return to the very first one; the
        // revisit is outside the 10-entry window and goes undetected.
        let mut actions: Vec<Action> = (0..12)
            .map(|i| nav(i, &format!("https://a.example/page{i}")))
            .collect();
        actions.push(nav(12, "https://a.example/page0"));
        let metrics = compute_metrics(&actions);
        assert!(metrics.back_forth_patterns.is_empty());
    }

    #[test]
    fn test_repeated_run_is_one_entry_with_full_count() {
        let mut actions = vec![nav(0, "https://a.example")];
        for i in 1..=5 {
            actions.push(action(ActionType::Click, i, "https://a.example"));
        }
        actions.push(action(ActionType::Input, 6, "https://a.example"));

        let metrics = compute_metrics(&actions);
        assert_eq!(metrics.repeated_actions.len(), 1);
        let run = &metrics.repeated_actions[0];
        assert_eq!(run.action_type, ActionType::Click);
        assert_eq!(run.count, 5);
        assert_eq!(run.indices, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_run_of_two_is_not_repeated() {
        let actions = vec![
            action(ActionType::Click, 0, "https://a.example"),
            action(ActionType::Click, 1, "https://a.example"),
            action(ActionType::Input, 2, "https://a.example"),
        ];
        let metrics = compute_metrics(&actions);
        assert!(metrics.repeated_actions.is_empty());
    }

    #[test]
    fn test_extraction_context_from_title_and_target() {
        let copy = with_page(
            action(ActionType::Copy, 0, "https://crm.example.com/contact"),
            "Contact 42",
            "jo@example.com",
        );
        let metrics = compute_metrics(&[copy]);
        assert_eq!(metrics.extraction_actions.len(), 1);
        assert_eq!(metrics.extraction_actions[0].context, "Contact 42: jo@example.com");
    }

    #[test]
    fn test_extraction_context_truncates_long_target_text() {
        let long_text = "x".repeat(200);
        let copy = with_page(action(ActionType::Copy, 0, "https://a.example"), "Page", &long_text);
        let metrics = compute_metrics(&[copy]);
        let context = &metrics.extraction_actions[0].context;
        assert!(context.chars().count() < 100);
        assert!(context.ends_with('…'));
    }

    #[test]
    fn test_url_changes_count_string_inequality() {
        let actions = vec![
            nav(0, "https://a.example/1"),
            nav(1, "https://a.example/2"),
            nav(2, "https://a.example/2"),
            nav(3, "https://b.example/1"),
        ];
        let metrics = compute_metrics(&actions);
        assert_eq!(metrics.url_changes, 2);
    }

    #[test]
    fn test_malformed_url_counts_as_change_but_not_domain() {
        let actions = vec![
            nav(0, "https://a.example/1"),
            nav(1, "::not-a-url::"),
            nav(2, "https://b.example/1"),
        ];
        let metrics = compute_metrics(&actions);
        assert_eq!(metrics.url_changes, 2);
        assert_eq!(metrics.unique_domains, vec!["a.example", "b.example"]);
    }
}
