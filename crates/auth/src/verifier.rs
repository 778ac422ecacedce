//! Identity provider verification

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::jwt::validate_identity_token;
use crate::types::VerifiedIdentity;

/// Verifies an opaque identity token and yields the subject it names.
#[async_trait::async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, AuthError>;
}

/// Verifier for HS256-signed identity tokens
#[derive(Debug, Clone)]
pub struct JwtIdentityVerifier {
    config: AuthConfig,
}

impl JwtIdentityVerifier {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }
}

#[async_trait::async_trait]
impl IdentityVerifier for JwtIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, AuthError> {
        let claims = validate_identity_token(token.trim(), &self.config)?;

        if claims.sub.trim().is_empty() {
            return Err(AuthError::MissingSubject);
        }

        Ok(VerifiedIdentity {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}
