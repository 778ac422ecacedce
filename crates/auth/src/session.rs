//! Server-side session table
//!
//! Maps an opaque session token (the cookie value) to the user it was issued
//! for. Sessions live for the process lifetime only and expire after the
//! configured TTL.

use std::collections::HashMap;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::AuthError;
use crate::types::SessionRecord;

/// In-process session table
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
    ttl: chrono::Duration,
}

impl SessionStore {
    pub fn new(ttl: chrono::Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Create a session for `user_id`, returning the session token.
    /// Also prunes expired sessions.
    pub async fn create(&self, user_id: &str) -> Result<String, AuthError> {
        // 32 random bytes, URL-safe base64 encoded (43 chars)
        let mut token_bytes = [0u8; 32];
        getrandom::getrandom(&mut token_bytes)
            .map_err(|e| AuthError::SessionCreationFailed(e.to_string()))?;
        let token = URL_SAFE_NO_PAD.encode(token_bytes);

        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| !s.is_expired(self.ttl, now));
        sessions.insert(token.clone(), SessionRecord::new(user_id.to_string()));

        tracing::debug!(user_id = %user_id, active_sessions = sessions.len(), "Session created");

        Ok(token)
    }

    /// Resolve a session token to its user, or `None` if unknown or expired
    pub async fn resolve(&self, token: &str) -> Option<String> {
        let sessions = self.sessions.read().await;
        let record = sessions.get(token)?;
        if record.is_expired(self.ttl, Utc::now()) {
            return None;
        }
        Some(record.user_id.clone())
    }

    /// Destroy a session; returns the user it belonged to, if any
    pub async fn destroy(&self, token: &str) -> Option<String> {
        self.sessions
            .write()
            .await
            .remove(token)
            .map(|record| record.user_id)
    }

    /// Number of stored sessions, expired ones included until the next prune
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
