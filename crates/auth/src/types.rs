//! Auth value types

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Identity established by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedIdentity {
    /// Opaque subject identifier; the conversation key
    pub user_id: String,
    pub email: Option<String>,
}

/// Server-side session entry
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(user_id: String) -> Self {
        Self {
            user_id,
            created_at: Utc::now(),
        }
    }

    /// Whether the session has outlived `ttl` at `now`
    pub fn is_expired(&self, ttl: chrono::Duration, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.created_at) >= ttl
    }
}
