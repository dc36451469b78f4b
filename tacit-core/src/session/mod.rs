//! Task-session accessor
//!
//! A session owns the actions captured for one task run and, once a run
//! completes, its generation result. Storage stays behind the
//! [`SessionStore`] trait; the in-memory map is the default and the
//! only implementation shipped here.

use crate::capture::Action;
use crate::docgen::GenerationResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// One task capture session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSession {
    pub id: String,
    pub actions: Vec<Action>,
    /// Replaced wholesale on every (re)generation, never patched
    pub result: Option<GenerationResult>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskSession {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            actions: Vec::new(),
            result: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Self::new() }
    }
}

impl Default for TaskSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Get/set access to sessions by opaque id
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, id: &str) -> Option<TaskSession>;
    async fn set(&self, session: TaskSession);
}

/// Default in-memory store
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, TaskSession>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, id: &str) -> Option<TaskSession> {
        self.sessions.read().await.get(id).cloned()
    }

    async fn set(&self, session: TaskSession) {
        self.sessions.write().await.insert(session.id.clone(), session);
    }
}

/// Append a capture batch to a session, creating the session when
/// absent. The capture source gives no deduplication guarantee and none
/// is applied here; batches are stored as delivered.
pub async fn append_actions(store: &dyn SessionStore, id: &str, batch: Vec<Action>) {
    let mut session = match store.get(id).await {
        Some(session) => session,
        None => TaskSession::with_id(id),
    };
    session.actions.extend(batch);
    session.updated_at = Utc::now();
    store.set(session).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::ActionType;
    use crate::capture::fixtures::action;

    #[tokio::test]
    async fn test_get_set_round_trip() {
        let store = MemorySessionStore::new();
        let session = TaskSession::with_id("session-1");
        store.set(session.clone()).await;

        let loaded = store.get("session-1").await.unwrap();
        assert_eq!(loaded.id, "session-1");
        assert!(loaded.actions.is_empty());
        assert!(store.get("session-2").await.is_none());
    }

    #[tokio::test]
    async fn test_append_creates_session_and_keeps_order() {
        let store = MemorySessionStore::new();
        append_actions(&store, "s", vec![action(ActionType::Navigation, 0, "https://a.example")])
            .await;
        append_actions(&store, "s", vec![action(ActionType::Click, 1, "https://a.example")])
            .await;

        let session = store.get("s").await.unwrap();
        assert_eq!(session.actions.len(), 2);
        assert_eq!(session.actions[0].action_type, ActionType::Navigation);
        assert_eq!(session.actions[1].action_type, ActionType::Click);
    }

    #[tokio::test]
    async fn test_redelivered_batches_are_not_deduplicated() {
        let store = MemorySessionStore::new();
        let batch = vec![action(ActionType::Click, 0, "https://a.example")];
        append_actions(&store, "s", batch.clone()).await;
        append_actions(&store, "s", batch).await;

        let session = store.get("s").await.unwrap();
        assert_eq!(session.actions.len(), 2);
    }
}
