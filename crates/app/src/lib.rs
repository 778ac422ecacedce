//! Chatbridge application composition root
//!
//! Wires the identity verifier, model gateway and history store into the
//! Conversations domain router.

use std::sync::Arc;

use axum::Router;
use chatbridge_auth::{AuthBackend, AuthConfig, JwtIdentityVerifier, SessionConfig};
use chatbridge_common::config::Config;
use chatbridge_conversations::{
    ChatState, ConversationStore, HistoryRepository, InMemoryHistoryRepository, KeywordClassifier,
    PgHistoryRepository,
};
use chatbridge_llm::{LlmConfig, LlmServiceFactory};
use sqlx::PgPool;

/// Connect the history document store.
///
/// With a database URL this connects to PostgreSQL and applies pending
/// migrations; without one, history lives in process memory only.
pub async fn history_repository(
    database_url: Option<&str>,
) -> Result<Arc<dyn HistoryRepository>, anyhow::Error> {
    match database_url {
        Some(url) => {
            let pool = PgPool::connect(url)
                .await
                .map_err(|e| anyhow::anyhow!("Database connection failed: {}", e))?;

            tracing::info!("Database connection established");

            sqlx::migrate!("../../migrations")
                .run(&pool)
                .await
                .map_err(|e| anyhow::anyhow!("Database migration failed: {}", e))?;

            tracing::info!("Database migrations applied");

            Ok(Arc::new(PgHistoryRepository::new(pool)))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, conversation history will not survive restarts");
            Ok(Arc::new(InMemoryHistoryRepository::new()))
        }
    }
}

/// Build the router for an already-assembled state
pub fn build_router(state: ChatState) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .merge(chatbridge_conversations::routes().with_state(state))
}

/// Create the main application router with all routes
pub async fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    // Create auth backend from environment
    let auth_config = AuthConfig::from_env()?;
    let session_config = SessionConfig::from_env()?;
    let auth = AuthBackend::new(Arc::new(JwtIdentityVerifier::new(auth_config)), session_config);

    // Create model gateway from environment
    let llm_config = LlmConfig::from_env()?;
    let gateway = LlmServiceFactory::create(llm_config)?;

    let repository = history_repository(config.database_url.as_deref()).await?;

    let state = ChatState::new(
        Arc::new(ConversationStore::new(repository)),
        Arc::new(KeywordClassifier::new()),
        gateway,
        auth,
    );

    Ok(build_router(state))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
