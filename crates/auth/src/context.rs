//! Authorization context for authenticated requests

/// Represents an authenticated session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Subject identifier from the identity provider
    pub user_id: String,
    /// Session token the request presented
    pub session_token: String,
}

impl AuthContext {
    pub fn new(user_id: String, session_token: String) -> Self {
        Self {
            user_id,
            session_token,
        }
    }
}
