//! AI DiagnoXpert - AI-powered medical assistant
//!
//! A Rust backend serving a single-page chat UI that forwards health
//! questions to the Groq chat-completion API.

mod api;
mod config;
mod insight;
mod llm;
mod session;

use api::{create_router, AppState};
use config::Config;
use insight::MedicalInsight;
use llm::{GroqService, LoggingService};
use session::SessionStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "diagnoxpert=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Pick up a local .env file before reading the environment
    let _ = dotenvy::dotenv();

    // Configuration; a missing API key refuses startup here
    let config = Config::from_env()?;

    // Build the completion client, wrapped with request logging
    let groq = GroqService::new(config.groq_api_key.clone(), config.model);
    let completion = Arc::new(LoggingService::new(Arc::new(groq)));

    tracing::info!(model = %config.model.api_name(), "Completion client initialized");

    let insight = Arc::new(MedicalInsight::new(completion));
    let sessions = Arc::new(SessionStore::new());

    // Create application state
    let state = AppState::new(sessions, insight, config.model);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state).layer(cors).layer(compression);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("DiagnoXpert server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
