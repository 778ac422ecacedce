//! Concrete authentication backend
//!
//! Wraps the identity verifier and the session table. Domain states expose
//! this via `FromRef`:
//! ```ignore
//! impl FromRef<MyDomainState> for AuthBackend {
//!     fn from_ref(state: &MyDomainState) -> Self {
//!         state.auth.clone()
//!     }
//! }
//! ```

use std::sync::Arc;

use axum::http::HeaderMap;

use crate::config::{SessionConfig, SESSION_COOKIE_NAME};
use crate::context::AuthContext;
use crate::error::AuthError;
use crate::jwt::extract_cookie;
use crate::session::SessionStore;
use crate::verifier::IdentityVerifier;

/// Result of a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub user_id: String,
    pub session_token: String,
}

#[derive(Clone)]
pub struct AuthBackend {
    verifier: Arc<dyn IdentityVerifier>,
    sessions: Arc<SessionStore>,
    config: SessionConfig,
}

impl AuthBackend {
    pub fn new(verifier: Arc<dyn IdentityVerifier>, config: SessionConfig) -> Self {
        Self {
            verifier,
            sessions: Arc::new(SessionStore::new(config.ttl)),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Verify an identity token and open a session for its subject.
    pub async fn login(&self, identity_token: &str) -> Result<LoginOutcome, AuthError> {
        let identity = self.verifier.verify(identity_token).await?;
        let session_token = self.sessions.create(&identity.user_id).await?;

        tracing::info!(user_id = %identity.user_id, "User logged in");

        Ok(LoginOutcome {
            user_id: identity.user_id,
            session_token,
        })
    }

    /// Resolve the session cookie on a request to an auth context.
    pub async fn authenticate_session(&self, headers: &HeaderMap) -> Result<AuthContext, AuthError> {
        let token = extract_cookie(headers, SESSION_COOKIE_NAME).ok_or(AuthError::MissingSession)?;

        let user_id = self
            .sessions
            .resolve(&token)
            .await
            .ok_or(AuthError::InvalidSession)?;

        Ok(AuthContext::new(user_id, token))
    }

    /// Destroy the session named by the request cookie, if any.
    pub async fn logout(&self, headers: &HeaderMap) -> Option<String> {
        let token = extract_cookie(headers, SESSION_COOKIE_NAME)?;
        let user_id = self.sessions.destroy(&token).await;
        if let Some(ref uid) = user_id {
            tracing::info!(user_id = %uid, "User logged out");
        }
        user_id
    }

    /// `Set-Cookie` value binding the browser to `session_token`
    pub fn session_cookie(&self, session_token: &str) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            SESSION_COOKIE_NAME,
            session_token,
            self.config.ttl.num_seconds().max(0)
        );
        if self.config.cookie_secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// `Set-Cookie` value that clears the session cookie
    pub fn expired_session_cookie(&self) -> String {
        let mut cookie = format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
            SESSION_COOKIE_NAME
        );
        if self.config.cookie_secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}
