//! Authentication configuration

use crate::error::AuthError;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE_NAME: &str = "chatbridge_session";

/// Default session lifetime (24 hours)
const DEFAULT_SESSION_TTL_SECS: i64 = 86_400;

/// Identity token verification configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

impl AuthConfig {
    /// Create auth config from environment variables
    pub fn from_env() -> Result<Self, AuthError> {
        dotenvy::dotenv().ok();

        let jwt_secret = std::env::var("JWT_SECRET").map_err(|_| {
            AuthError::Configuration("JWT_SECRET environment variable is required".to_string())
        })?;

        Ok(Self {
            jwt_secret,
            issuer: std::env::var("JWT_ISSUER").ok(),
            audience: std::env::var("JWT_AUDIENCE").ok(),
        })
    }
}

/// Session cookie configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Session lifetime; also the cookie `Max-Age`
    pub ttl: chrono::Duration,
    /// Mark the cookie `Secure` (HTTPS deployments)
    pub cookie_secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: chrono::Duration::seconds(DEFAULT_SESSION_TTL_SECS),
            cookie_secure: false,
        }
    }
}

impl SessionConfig {
    /// Create session config from environment variables
    pub fn from_env() -> Result<Self, AuthError> {
        let ttl_secs = match std::env::var("SESSION_TTL_SECS") {
            Ok(value) => value.parse::<i64>().map_err(|e| {
                AuthError::Configuration(format!("SESSION_TTL_SECS must be an integer: {}", e))
            })?,
            Err(_) => DEFAULT_SESSION_TTL_SECS,
        };

        let cookie_secure = std::env::var("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|_| "false".to_string())
            .parse()
            .unwrap_or(false);

        Ok(Self {
            ttl: chrono::Duration::seconds(ttl_secs),
            cookie_secure,
        })
    }
}
