//! Axum extractors for authentication
//!
//! Generic over any state `S` where `AuthBackend: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::backend::AuthBackend;
use crate::context::AuthContext;
use crate::error::AuthError;

/// Session-authenticated user extractor (session cookie)
///
/// Rejects with 401 when the cookie is missing or the session is unknown or
/// expired. Page handlers that redirect instead take `Result<SessionUser, AuthError>`.
#[derive(Debug)]
pub struct SessionUser(pub AuthContext);

impl<S> FromRequestParts<S> for SessionUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let backend = AuthBackend::from_ref(state);
        let auth_context = backend.authenticate_session(&parts.headers).await?;
        Ok(SessionUser(auth_context))
    }
}
