//! Deterministic analysis of captured action streams
//!
//! Pure, reentrant functions only: aggregate statistics and flagged
//! behavioral patterns (`metrics`), and rule-based chunk boundary
//! proposals (`prechunk`). Nothing in this module calls a model; the
//! interpretive segmentation happens later in the generation pipeline
//! and is free to disregard the boundaries proposed here.

pub mod metrics;
pub mod prechunk;

pub use metrics::{
    BackForthPattern, ExtractionAction, LongPause, RepeatedActionInfo, TaskMetrics,
    compute_metrics,
};
pub use prechunk::{Boundary, PreChunk, pre_chunk};

use url::Url;

/// Hostname of a URL, or `None` when it does not parse
pub(crate) fn host_of(url: &str) -> Option<String> {
    Url::parse(url).ok()?.host_str().map(|h| h.to_string())
}
