//! Groq provider implementation
//!
//! Groq serves the OpenAI-compatible chat-completions schema, so the wire
//! types here mirror that format.

use super::types::{CompletionReply, CompletionRequest, Usage};
use super::{CompletionService, LlmError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GROQ_CHAT_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Models hosted by Groq
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroqModel {
    Llama38B,
    Llama370B,
    Mixtral8x7B,
    Gemma7B,
}

impl Default for GroqModel {
    fn default() -> Self {
        GroqModel::Llama38B
    }
}

impl GroqModel {
    pub fn api_name(self) -> &'static str {
        match self {
            GroqModel::Llama38B => "llama3-8b-8192",
            GroqModel::Llama370B => "llama3-70b-8192",
            GroqModel::Mixtral8x7B => "mixtral-8x7b-32768",
            GroqModel::Gemma7B => "gemma-7b-it",
        }
    }

    pub fn from_api_name(name: &str) -> Option<Self> {
        match name {
            "llama3-8b-8192" => Some(GroqModel::Llama38B),
            "llama3-70b-8192" => Some(GroqModel::Llama370B),
            "mixtral-8x7b-32768" => Some(GroqModel::Mixtral8x7B),
            "gemma-7b-it" => Some(GroqModel::Gemma7B),
            _ => None,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            GroqModel::Llama38B => "Llama 3 8B, fast general-purpose chat",
            GroqModel::Llama370B => "Llama 3 70B, higher quality answers",
            GroqModel::Mixtral8x7B => "Mixtral 8x7B mixture-of-experts",
            GroqModel::Gemma7B => "Gemma 7B instruction-tuned",
        }
    }
}

/// Groq service implementation
pub struct GroqService {
    client: Client,
    api_key: String,
    model: GroqModel,
    base_url: String,
}

impl GroqService {
    pub fn new(api_key: String, model: GroqModel) -> Self {
        Self::with_base_url(api_key, model, GROQ_CHAT_URL.to_string())
    }

    /// Construct against a non-default endpoint (used by tests)
    pub fn with_base_url(api_key: String, model: GroqModel, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            model,
            base_url,
        }
    }

    fn translate_request(&self, request: &CompletionRequest) -> GroqRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        // System instruction first, then the conversation in order
        messages.push(GroqMessage {
            role: "system".to_string(),
            content: request.system.clone(),
        });

        for turn in &request.messages {
            messages.push(GroqMessage {
                role: turn.role.as_str().to_string(),
                content: turn.content.clone(),
            });
        }

        GroqRequest {
            model: self.model.api_name().to_string(),
            messages,
            stream: false,
        }
    }

    fn normalize_response(resp: GroqResponse) -> Result<CompletionReply, LlmError> {
        let choice = resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::unknown("No choices in response"))?;

        Ok(CompletionReply {
            text: choice.message.content,
            usage: Usage {
                input_tokens: u64::from(resp.usage.prompt_tokens),
                output_tokens: u64::from(resp.usage.completion_tokens),
            },
        })
    }
}

#[async_trait]
impl CompletionService for GroqService {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionReply, LlmError> {
        let groq_request = self.translate_request(request);

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&groq_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    LlmError::network(format!("Connection failed: {e}"))
                } else {
                    LlmError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            // Parse error response
            if let Ok(error_resp) = serde_json::from_str::<GroqErrorResponse>(&body) {
                let message = error_resp.error.message;
                return Err(match status.as_u16() {
                    401 | 403 => LlmError::auth(format!("Authentication failed: {message}")),
                    429 => LlmError::rate_limit(format!("Rate limit exceeded: {message}")),
                    400 => LlmError::invalid_request(format!("Invalid request: {message}")),
                    500..=599 => LlmError::server_error(format!("Server error: {message}")),
                    _ => LlmError::unknown(format!("HTTP {status}: {message}")),
                });
            }
            return Err(LlmError::unknown(format!("HTTP {status} error: {body}")));
        }

        let groq_response: GroqResponse = serde_json::from_str(&body).map_err(|e| {
            LlmError::unknown(format!("Failed to parse response: {e} - body: {body}"))
        })?;

        Self::normalize_response(groq_response)
    }

    fn model_id(&self) -> &str {
        self.model.api_name()
    }
}

// Groq API types (OpenAI chat-completions schema)

#[derive(Debug, Serialize)]
struct GroqRequest {
    model: String,
    messages: Vec<GroqMessage>,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct GroqMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct GroqResponse {
    choices: Vec<GroqChoice>,
    usage: GroqUsage,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: GroqMessage,
    #[allow(dead_code)] // Part of API response, not always used
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    #[allow(dead_code)] // Part of API response, not always used
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GroqErrorResponse {
    error: GroqApiError,
}

#[derive(Debug, Deserialize)]
struct GroqApiError {
    message: String,
    #[allow(dead_code)]
    r#type: Option<String>,
    #[allow(dead_code)]
    code: Option<String>,
}
