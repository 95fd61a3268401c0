//! Medical insight service
//!
//! Turns a user prompt plus prior conversation history into displayable
//! answer text. The single completion call is the only side effect; every
//! call failure is absorbed here and rendered as the fixed fallback reply,
//! so callers never see an error.

use crate::llm::{CompletionRequest, CompletionService, Turn};
use std::sync::Arc;

/// Directive sent with every completion call. Never stored in a session
/// transcript and never shown to the user.
const SYSTEM_INSTRUCTION: &str = r"You are AI DiagnoXpert, an AI-powered medical insight and diagnostic assistant. Your purpose is to provide general information about health topics, symptoms, and drugs based on your training data. **ABSOLUTELY DO NOT provide medical diagnoses, treatment plans, or specific medical advice.** Your responses should be informative but always include a clear disclaimer recommending the user consult a qualified healthcare professional for any health concerns. Explain medical concepts clearly and concisely. Be helpful and empathetic. Structure drug information clearly (e.g., uses, common side effects - extracted from your knowledge, not external search). When discussing symptoms, mention *possible* causes but reiterate that self-diagnosis is not recommended.";

/// Appended to replies that carry neither trigger phrase
const DISCLAIMER: &str = "**Important:** This information is for educational purposes only and does not constitute medical advice. Always consult with a qualified healthcare professional for any health concerns or before making any decisions related to your health or treatment.";

/// Returned verbatim whenever the completion call fails
const FALLBACK_REPLY: &str = "Sorry, I encountered an error trying to get that information. Please try again later or consult a healthcare professional.";

/// Phrases whose presence (case-insensitive) suppresses the disclaimer
const DISCLAIMER_TRIGGERS: &[&str] = &["consult a healthcare professional", "medical advice"];

/// Stateless wrapper around the completion client
pub struct MedicalInsight {
    completion: Arc<dyn CompletionService>,
}

impl MedicalInsight {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }

    /// Answer `prompt` in the context of the prior `history`.
    ///
    /// The wire message list is always the hidden system instruction, the
    /// history in its original order, then the new user prompt. Exactly one
    /// completion call is made: no retry, no streaming.
    pub async fn get_medical_insight(&self, prompt: &str, history: &[Turn]) -> String {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.extend_from_slice(history);
        messages.push(Turn::user(prompt));

        let request = CompletionRequest {
            system: SYSTEM_INSTRUCTION.to_string(),
            messages,
        };

        match self.completion.complete(&request).await {
            Ok(reply) => ensure_disclaimer(reply.text),
            Err(e) => {
                tracing::error!(kind = ?e.kind, error = %e.message, "Error calling Groq API");
                FALLBACK_REPLY.to_string()
            }
        }
    }
}

/// Append the disclaimer unless the reply already mentions one of the
/// trigger phrases. A cheap substring check, not a classifier.
fn ensure_disclaimer(text: String) -> String {
    let lowered = text.to_lowercase();
    if DISCLAIMER_TRIGGERS
        .iter()
        .any(|phrase| lowered.contains(phrase))
    {
        text
    } else {
        format!("{text}\n\n{DISCLAIMER}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::MockCompletionService;
    use crate::llm::{LlmError, TurnRole};

    fn insight(mock: Arc<MockCompletionService>) -> MedicalInsight {
        MedicalInsight::new(mock)
    }

    #[tokio::test]
    async fn test_disclaimer_appended_when_missing() {
        let mock = Arc::new(MockCompletionService::new("test-model"));
        mock.queue_reply("Fever is commonly caused by infection.");

        let answer = insight(mock).get_medical_insight("why fever?", &[]).await;

        assert_eq!(
            answer,
            format!("Fever is commonly caused by infection.\n\n{DISCLAIMER}")
        );
    }

    #[tokio::test]
    async fn test_reply_mentioning_medical_advice_is_unmodified() {
        let mock = Arc::new(MockCompletionService::new("test-model"));
        mock.queue_reply("Rest and hydration help. This is not Medical Advice.");

        let answer = insight(mock).get_medical_insight("flu tips", &[]).await;

        // Case-insensitive match on the trigger phrase, no disclaimer
        assert_eq!(answer, "Rest and hydration help. This is not Medical Advice.");
    }

    #[tokio::test]
    async fn test_reply_mentioning_professional_is_unmodified() {
        let mock = Arc::new(MockCompletionService::new("test-model"));
        mock.queue_reply("Please CONSULT A HEALTHCARE PROFESSIONAL about this.");

        let answer = insight(mock).get_medical_insight("chest pain", &[]).await;

        assert_eq!(answer, "Please CONSULT A HEALTHCARE PROFESSIONAL about this.");
    }

    #[tokio::test]
    async fn test_failure_returns_fallback_verbatim() {
        let mock = Arc::new(MockCompletionService::new("test-model"));
        mock.queue_error(LlmError::rate_limit("slow down"));

        let answer = insight(mock).get_medical_insight("why fever?", &[]).await;

        assert_eq!(
            answer,
            "Sorry, I encountered an error trying to get that information. \
             Please try again later or consult a healthcare professional."
        );
    }

    #[tokio::test]
    async fn test_request_is_system_plus_history_plus_prompt() {
        let mock = Arc::new(MockCompletionService::new("test-model"));
        mock.queue_reply("ok, medical advice disclaimer included");

        let history = vec![
            Turn::user("what causes fever?"),
            Turn::assistant("Commonly infection."),
        ];
        insight(mock.clone())
            .get_medical_insight("and chills?", &history)
            .await;

        let requests = mock.recorded_requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];

        assert_eq!(request.system, SYSTEM_INSTRUCTION);
        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.messages[0], history[0]);
        assert_eq!(request.messages[1], history[1]);
        assert_eq!(request.messages[2], Turn::user("and chills?"));
        // Only user/assistant roles appear in the message list
        assert!(request
            .messages
            .iter()
            .all(|t| matches!(t.role, TurnRole::User | TurnRole::Assistant)));
    }

    #[tokio::test]
    async fn test_no_state_retained_between_calls() {
        let mock = Arc::new(MockCompletionService::new("test-model"));
        mock.queue_reply("first, medical advice noted");
        mock.queue_reply("second, medical advice noted");

        let service = insight(mock.clone());
        service.get_medical_insight("one", &[]).await;
        service.get_medical_insight("two", &[]).await;

        let requests = mock.recorded_requests();
        assert_eq!(requests.len(), 2);
        // The second request is built only from its own arguments
        assert_eq!(requests[1].messages.len(), 1);
        assert_eq!(requests[1].messages[0], Turn::user("two"));
    }
}
