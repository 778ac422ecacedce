//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No session cookie on a protected request
    #[error("Login required")]
    MissingSession,
    /// Session cookie present but unknown or expired
    #[error("Session expired or invalid")]
    InvalidSession,
    /// Identity token failed verification
    #[error("Invalid or expired identity token")]
    InvalidToken,
    /// Identity token verified but carries no subject
    #[error("Identity token has no subject")]
    MissingSubject,
    /// Session token could not be generated
    #[error("Failed to create session: {0}")]
    SessionCreationFailed(String),
    #[error("Auth configuration error: {0}")]
    Configuration(String),
}

impl AuthError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingSession => "MISSING_SESSION",
            AuthError::InvalidSession => "INVALID_SESSION",
            AuthError::InvalidToken => "INVALID_TOKEN",
            AuthError::MissingSubject => "INVALID_TOKEN",
            AuthError::SessionCreationFailed(_) => "SESSION_ERROR",
            AuthError::Configuration(_) => "AUTH_CONFIGURATION_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingSession | AuthError::InvalidSession => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken | AuthError::MissingSubject => StatusCode::BAD_REQUEST,
            AuthError::SessionCreationFailed(_) | AuthError::Configuration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}
