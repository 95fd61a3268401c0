//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::types::{
    ChatRequest, ChatResponse, ErrorResponse, ModelResponse, SessionInfo, SessionResponse,
    SessionWithMessagesResponse, SuccessResponse,
};
use super::AppState;
use crate::llm::{Turn, TurnRole};
use crate::session::UnknownSession;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root serves the chat page
        .route("/", get(serve_app))
        // Static assets (embedded or filesystem fallback)
        .route("/assets/*path", get(serve_static))
        // Session creation
        .route("/api/sessions/new", post(create_session))
        // Transcript retrieval
        .route("/api/sessions/:id", get(get_session))
        // Chat submission
        .route("/api/sessions/:id/chat", post(send_chat))
        // Transcript reset
        .route("/api/sessions/:id/reset", post(reset_session))
        // Model info
        .route("/api/model", get(get_model))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Chat Page
// ============================================================

/// Serve the single-page chat UI
async fn serve_app() -> impl IntoResponse {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - UI not found</h1>".to_string()),
        )
            .into_response(),
    }
}

// ============================================================
// Sessions
// ============================================================

async fn create_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.sessions.create().await;
    tracing::debug!(session_id = %session.id, "Session created");

    Json(SessionResponse {
        session: SessionInfo::from(&session),
    })
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionWithMessagesResponse>, AppError> {
    let session = state.sessions.get(&id).await?;

    Ok(Json(SessionWithMessagesResponse {
        session: SessionInfo::from(&session),
        messages: session.turns().to_vec(),
    }))
}

// ============================================================
// Chat Submission
// ============================================================

async fn send_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::BadRequest("Message text is empty".to_string()));
    }

    // Completion context is the transcript as recorded before this
    // submission, snapshotted before the new user turn lands
    let history = state.sessions.history(&id).await?;
    state.sessions.append(&id, TurnRole::User, &req.text).await?;

    // The one blocking suspension point of a submission. Never errors:
    // failures come back as displayable fallback text.
    let answer = state.insight.get_medical_insight(&req.text, &history).await;

    state
        .sessions
        .append(&id, TurnRole::Assistant, &answer)
        .await?;

    Ok(Json(ChatResponse {
        reply: Turn::assistant(answer),
    }))
}

async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.sessions.reset(&id).await?;
    tracing::debug!(session_id = %id, "Session reset");

    Ok(Json(SuccessResponse { success: true }))
}

// ============================================================
// Model Info
// ============================================================

async fn get_model(State(state): State<AppState>) -> Json<ModelResponse> {
    Json(ModelResponse {
        model: state.model.api_name().to_string(),
        description: state.model.description().to_string(),
    })
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("diagnoxpert ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
    NotFound(String),
}

impl From<UnknownSession> for AppError {
    fn from(e: UnknownSession) -> Self {
        AppError::NotFound(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
