//! Captured browser interaction events
//!
//! Types mirroring the wire format delivered by the capture extension.
//! Field names are camelCase on the wire. Actions are immutable once
//! recorded and ordered by capture sequence, not by timestamp equality.

use serde::{Deserialize, Serialize};

/// Kind of a captured interaction event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Click,
    Input,
    Navigation,
    Copy,
    Scroll,
}

/// Element the interaction targeted
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActionTarget {
    #[serde(default)]
    pub selector: String,
    #[serde(default)]
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Page context recorded alongside an action
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActionMetadata {
    #[serde(default)]
    pub page_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h1: Option<String>,
    /// Milliseconds of idle time since the previous action, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_time_before: Option<u64>,
}

/// One captured user interaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    /// Epoch milliseconds, non-decreasing within a session
    pub timestamp: u64,
    pub url: String,
    #[serde(default)]
    pub target: ActionTarget,
    #[serde(default)]
    pub metadata: ActionMetadata,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn action(action_type: ActionType, timestamp: u64, url: &str) -> Action {
        Action {
            action_type,
            timestamp,
            url: url.to_string(),
            target: ActionTarget::default(),
            metadata: ActionMetadata::default(),
        }
    }

    pub fn with_idle(mut action: Action, idle_ms: u64) -> Action {
        action.metadata.idle_time_before = Some(idle_ms);
        action
    }

    pub fn with_page(mut action: Action, title: &str, target_text: &str) -> Action {
        action.metadata.page_title = title.to_string();
        action.target.text = target_text.to_string();
        action
    }
}
