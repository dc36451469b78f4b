//! Deterministic analysis of a capture file, no provider involved

use super::load_actions;
use crate::cli::app::AnalyzeArgs;
use anyhow::Result;
use tacit_core::{compute_metrics, pre_chunk};
use tracing::info;

pub fn execute(args: AnalyzeArgs) -> Result<()> {
    let actions = load_actions(&args.input)?;
    info!(actions = actions.len(), "analyzing capture file");

    let metrics = compute_metrics(&actions);
    let chunks = pre_chunk(&actions);

    let report = serde_json::json!({
        "metrics": metrics,
        "preChunks": chunks,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
