//! HTTP API for AI DiagnoXpert

mod assets;
mod handlers;
mod types;

pub use handlers::create_router;

use crate::insight::MedicalInsight;
use crate::llm::GroqModel;
use crate::session::SessionStore;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub insight: Arc<MedicalInsight>,
    pub model: GroqModel,
}

impl AppState {
    pub fn new(sessions: Arc<SessionStore>, insight: Arc<MedicalInsight>, model: GroqModel) -> Self {
        Self {
            sessions,
            insight,
            model,
        }
    }
}
