//! Rule-based pre-segmentation of the action stream
//!
//! `pre_chunk` proposes deterministic chunk boundaries in a single
//! forward pass. The boundaries are advisory: the interpretive segmenter
//! stage receives them as hints and may disregard them entirely.

use super::host_of;
use crate::capture::{Action, ActionType};
use serde::{Deserialize, Serialize};

/// Idle time at or above this closes the open chunk
pub const CHUNK_PAUSE_THRESHOLD_MS: u64 = 15_000;

/// Why a chunk ended. The terminal chunk always carries `Start`
/// regardless of why the stream ended; it is a label of the open chunk,
/// not a fourth boundary rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    UrlChange,
    LongPause,
    ModeChange,
    Start,
}

/// Coarse interaction mode used by the mode-change rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActionMode {
    Navigation,
    Extraction,
    Interaction,
}

fn mode_of(action_type: ActionType) -> ActionMode {
    match action_type {
        ActionType::Navigation | ActionType::Scroll => ActionMode::Navigation,
        ActionType::Copy => ActionMode::Extraction,
        ActionType::Click | ActionType::Input => ActionMode::Interaction,
    }
}

/// A contiguous span of the action sequence with the rule that closed it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreChunk {
    pub start_index: usize,
    pub end_index: usize,
    pub actions: Vec<Action>,
    pub boundary: Boundary,
}

/// Ordered boundary rules, evaluated short-circuit before index `i`:
/// pause beats hostname change beats mode change, and at most one rule
/// fires per index. Reordering would change observable chunk boundaries.
fn boundary_before(prev: &Action, current: &Action) -> Option<Boundary> {
    if current
        .metadata
        .idle_time_before
        .is_some_and(|idle| idle >= CHUNK_PAUSE_THRESHOLD_MS)
    {
        return Some(Boundary::LongPause);
    }

    // an unparseable URL on either side is treated as a hostname change
    match (host_of(&prev.url), host_of(&current.url)) {
        (Some(prev_host), Some(current_host)) if prev_host == current_host => {}
        _ => return Some(Boundary::UrlChange),
    }

    if mode_of(prev.action_type) != mode_of(current.action_type) {
        return Some(Boundary::ModeChange);
    }

    None
}

/// Split the action list into contiguous, total-covering chunks.
///
/// The first chunk starts at index 0 and the last ends at
/// `actions.len() - 1`; chunk `i + 1` starts exactly where chunk `i`
/// ended.
pub fn pre_chunk(actions: &[Action]) -> Vec<PreChunk> {
    let mut chunks = Vec::new();
    if actions.is_empty() {
        return chunks;
    }

    let mut start = 0;
    for i in 1..actions.len() {
        if let Some(boundary) = boundary_before(&actions[i - 1], &actions[i]) {
            chunks.push(PreChunk {
                start_index: start,
                end_index: i - 1,
                actions: actions[start..i].to_vec(),
                boundary,
            });
            start = i;
        }
    }

    // the trailing open chunk keeps the initial label
    chunks.push(PreChunk {
        start_index: start,
        end_index: actions.len() - 1,
        actions: actions[start..].to_vec(),
        boundary: Boundary::Start,
    });

    chunks
}
