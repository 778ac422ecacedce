//! Login, logout and landing page handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{
        header::{CACHE_CONTROL, EXPIRES, PRAGMA, SET_COOKIE},
        HeaderMap, StatusCode,
    },
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use chatbridge_auth::AuthError;
use serde::{Deserialize, Serialize};

use crate::api::middleware::ChatState;
use crate::api::pages;

/// Request for logging in with an identity-provider token
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub token: String,
}

/// Login response body
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LoginResponse {
    fn success(uid: String) -> Self {
        Self {
            success: true,
            uid: Some(uid),
            redirect: Some("/chat".to_string()),
            message: None,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            uid: None,
            redirect: None,
            message: Some(message.into()),
        }
    }
}

fn login_failure(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(LoginResponse::failure(message))).into_response()
}

/// Landing page: always sends the browser to the login page
pub async fn index() -> Redirect {
    Redirect::to("/login")
}

/// Render the login page
pub async fn login_page() -> Html<String> {
    Html(pages::login_page())
}

/// Verify an identity token, open a session and restore stored history
pub async fn login(
    State(state): State<ChatState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Rejected login body");
            return login_failure(StatusCode::BAD_REQUEST, "No token provided");
        }
    };

    if req.token.trim().is_empty() {
        return login_failure(StatusCode::BAD_REQUEST, "No token provided");
    }

    let outcome = match state.auth.login(req.token.trim()).await {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::warn!(error = %err, "Login failed");
            let status = match err {
                AuthError::SessionCreationFailed(_) | AuthError::Configuration(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                _ => StatusCode::BAD_REQUEST,
            };
            return login_failure(status, err.to_string());
        }
    };

    // Stored history is best effort: a failed read still lets the user in
    if let Err(e) = state.store.restore(&outcome.user_id).await {
        tracing::error!(
            user_id = %outcome.user_id,
            error = %e,
            "Failed to restore conversation history"
        );
    }

    let cookie = state.auth.session_cookie(&outcome.session_token);

    (
        StatusCode::OK,
        [(SET_COOKIE, cookie)],
        Json(LoginResponse::success(outcome.user_id)),
    )
        .into_response()
}

/// Drop the session, clear the cookie and send the browser back to login.
///
/// Succeeds whether or not a session was present.
pub async fn logout(State(state): State<ChatState>, headers: HeaderMap) -> Response {
    state.auth.logout(&headers).await;

    (
        [
            (SET_COOKIE, state.auth.expired_session_cookie()),
            (
                CACHE_CONTROL,
                "no-cache, no-store, must-revalidate".to_string(),
            ),
            (PRAGMA, "no-cache".to_string()),
            (EXPIRES, "0".to_string()),
        ],
        Redirect::to("/login"),
    )
        .into_response()
}
