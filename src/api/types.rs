//! API request and response types

use crate::llm::Turn;
use crate::session::Session;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Response for the chat action: the assistant's reply turn
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: Turn,
}

/// Session metadata
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Session> for SessionInfo {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id.clone(),
            created_at: session.created_at,
        }
    }
}

/// Response with a newly created session
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session: SessionInfo,
}

/// Response with a session and its ordered transcript
#[derive(Debug, Serialize)]
pub struct SessionWithMessagesResponse {
    pub session: SessionInfo,
    pub messages: Vec<Turn>,
}

/// Response for the reset action
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Configured model information
#[derive(Debug, Serialize)]
pub struct ModelResponse {
    pub model: String,
    pub description: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
