//! Command implementations

pub mod analyze;
pub mod generate;

use anyhow::{Context, Result};
use std::path::Path;
use tacit_core::capture::Action;

/// Load a captured-actions JSON file (an array of actions in capture order)
pub fn load_actions(path: &Path) -> Result<Vec<Action>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read actions file {}", path.display()))?;
    let actions: Vec<Action> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse actions file {}", path.display()))?;
    Ok(actions)
}
