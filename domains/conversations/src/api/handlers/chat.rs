//! Chat API handlers
//!
//! `POST /chat` routes each message either to the chat-completion API or to the
//! image-generation API, depending on the intent classifier.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use chatbridge_auth::{AuthError, SessionUser};
use chatbridge_common::{Error, Result, ValidatedForm};
use chatbridge_llm::{CompletionRequest, ImageRequest};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::middleware::ChatState;
use crate::api::pages;
use crate::domain::entities::{Conversation, Message};

/// Stored in place of the prompt when an image is generated
pub const IMAGE_REQUEST_PLACEHOLDER: &str = "이미지 생성 요청";
/// Stored in place of the image when one is generated
pub const IMAGE_RESULT_PLACEHOLDER: &str = "이미지를 생성했습니다.";
/// Reply text accompanying a generated image
pub const IMAGE_REPLY: &str = "이미지를 생성했습니다:";
/// Prefix of the reply when image generation fails
pub const IMAGE_FAILURE_PREFIX: &str = "죄송합니다. 이미지를 생성하지 못했습니다:";

/// Chat form submitted by the browser
#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(custom(function = "validate_not_blank", message = "Message must not be empty"))]
    pub message: String,
}

fn validate_not_blank(value: &str) -> std::result::Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}

/// Reply to a chat message
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ChatReply {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Reply to a direct image request
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ImageReply {
    pub image_url: String,
}

/// Write the conversation to the document store; failures are logged only
async fn persist(state: &ChatState, user_id: &str, conversation: &Conversation) {
    if let Err(e) = state.store.save(user_id, conversation).await {
        tracing::error!(
            user_id = %user_id,
            error = %e,
            "Failed to persist conversation history"
        );
    }
}

/// Render the chat page, or send the browser to login without a session
pub async fn chat_page(
    session: std::result::Result<SessionUser, AuthError>,
    State(state): State<ChatState>,
) -> Response {
    let SessionUser(ctx) = match session {
        Ok(user) => user,
        Err(_) => return Redirect::to("/login").into_response(),
    };

    let history = state.store.history(&ctx.user_id).await;
    Html(pages::chat_page(&ctx.user_id, &history)).into_response()
}

/// Answer one chat message with text or a generated image.
///
/// The exchange runs on its own task so a client that disconnects mid-call
/// still leaves a complete user/assistant pair in the history.
pub async fn chat(
    SessionUser(ctx): SessionUser,
    State(state): State<ChatState>,
    ValidatedForm(req): ValidatedForm<ChatRequest>,
) -> Result<Json<ChatReply>> {
    let user_id = ctx.user_id;
    let exchange = tokio::spawn(run_exchange(state, user_id, req.message));

    let reply = exchange.await.map_err(|e| {
        tracing::error!(error = %e, "Chat exchange task failed");
        Error::Internal(e.to_string())
    })?;

    Ok(Json(reply))
}

async fn run_exchange(state: ChatState, user_id: String, message: String) -> ChatReply {
    // Held until the reply is built so same-user exchanges never interleave
    let mut conversation = state.store.lock(&user_id).await;

    if state.classifier.classify(&message) {
        let prompt = message.trim().to_string();
        tracing::info!(user_id = %user_id, "Routing chat message to image generation");

        return match state.images.generate(ImageRequest { prompt }).await {
            Ok(image) => {
                conversation.push(Message::user(IMAGE_REQUEST_PLACEHOLDER));
                conversation.push(Message::assistant(IMAGE_RESULT_PLACEHOLDER));
                persist(&state, &user_id, &conversation).await;

                ChatReply {
                    reply: IMAGE_REPLY.to_string(),
                    image_url: Some(image.url),
                }
            }
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Image generation failed");
                ChatReply {
                    reply: format!("{} {}", IMAGE_FAILURE_PREFIX, e),
                    image_url: None,
                }
            }
        };
    }

    conversation.push(Message::user(message));
    let request = CompletionRequest::new(conversation.to_llm_messages());

    let reply = match state.llm.complete(request).await {
        Ok(response) => {
            tracing::info!(
                user_id = %user_id,
                model = %response.model,
                input_tokens = response.input_tokens,
                output_tokens = response.output_tokens,
                "Chat completion succeeded"
            );
            response.content
        }
        Err(e) => {
            tracing::warn!(user_id = %user_id, error = %e, "Chat completion failed");
            format!("Error: {}", e)
        }
    };

    conversation.push(Message::assistant(reply.clone()));
    persist(&state, &user_id, &conversation).await;

    ChatReply {
        reply,
        image_url: None,
    }
}

/// Generate an image without touching the conversation history
pub async fn generate_image(
    SessionUser(ctx): SessionUser,
    State(state): State<ChatState>,
    ValidatedForm(req): ValidatedForm<ChatRequest>,
) -> Result<Json<ImageReply>> {
    let prompt = req.message.trim().to_string();

    let image = state
        .images
        .generate(ImageRequest { prompt })
        .await
        .map_err(|e| {
            tracing::warn!(user_id = %ctx.user_id, error = %e, "Image generation failed");
            Error::Upstream(e.to_string())
        })?;

    Ok(Json(ImageReply {
        image_url: image.url,
    }))
}
