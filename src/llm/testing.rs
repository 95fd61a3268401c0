//! Mock completion service for tests
//!
//! Enables exercising the conversation flow without real network I/O.

use super::{CompletionReply, CompletionRequest, CompletionService, LlmError, Usage};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock completion service that returns queued responses
pub struct MockCompletionService {
    responses: Mutex<VecDeque<Result<CompletionReply, LlmError>>>,
    model_id: String,
    /// Record of all requests made
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl MockCompletionService {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            model_id: model_id.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful reply with the given text
    pub fn queue_reply(&self, text: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(CompletionReply {
            text: text.into(),
            usage: Usage::default(),
        }));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for MockCompletionService {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionReply, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock response queued")))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
