//! In-memory conversation store
//!
//! One `Session` per active chat; turns are append-only and live only for
//! the lifetime of the process. Nothing is persisted.

#[cfg(test)]
mod proptests;

use crate::llm::{Turn, TurnRole};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

/// Raised when an operation names a session the store does not hold
#[derive(Debug, Error)]
#[error("unknown session {0}")]
pub struct UnknownSession(pub String);

/// One user's active conversation
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
    turns: Vec<Turn>,
}

impl Session {
    fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            turns: Vec::new(),
        }
    }

    /// Append a turn to the end of the transcript
    pub fn append(&mut self, role: TurnRole, content: impl Into<String>) {
        self.turns.push(Turn {
            role,
            content: content.into(),
        });
    }

    /// Ordered transcript, oldest first
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The turns used as completion context. Only user/assistant roles can
    /// exist in a transcript, so this is the full transcript at call time.
    pub fn history(&self) -> Vec<Turn> {
        self.turns.clone()
    }

    /// Clear the transcript
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

/// Registry of live sessions, keyed by id
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create an empty session and return a snapshot of it
    pub async fn create(&self) -> Session {
        let session = Session::new();
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());
        session
    }

    /// Snapshot a session by id
    pub async fn get(&self, id: &str) -> Result<Session, UnknownSession> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| UnknownSession(id.to_string()))
    }

    /// Snapshot the completion context of a session
    pub async fn history(&self, id: &str) -> Result<Vec<Turn>, UnknownSession> {
        Ok(self.get(id).await?.history())
    }

    /// Append a turn to a session's transcript
    pub async fn append(
        &self,
        id: &str,
        role: TurnRole,
        content: impl Into<String>,
    ) -> Result<(), UnknownSession> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| UnknownSession(id.to_string()))?;
        session.append(role, content);
        Ok(())
    }

    /// Clear a session's transcript
    pub async fn reset(&self, id: &str) -> Result<(), UnknownSession> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| UnknownSession(id.to_string()))?;
        session.clear();
        Ok(())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
