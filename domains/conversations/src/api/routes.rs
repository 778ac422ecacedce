//! Route definitions for Conversations domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{auth, chat};
use super::middleware::ChatState;

/// Create login/logout routes
fn auth_routes() -> Router<ChatState> {
    Router::new()
        .route("/", get(auth::index))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create chat routes
fn chat_routes() -> Router<ChatState> {
    Router::new()
        .route("/chat", get(chat::chat_page).post(chat::chat))
        .route("/generate_image", post(chat::generate_image))
}

/// Create all Conversations domain API routes
pub fn routes() -> Router<ChatState> {
    Router::new().merge(auth_routes()).merge(chat_routes())
}
