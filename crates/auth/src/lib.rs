//! Authentication for Chatbridge
//!
//! Verifies identity-provider tokens at login, keeps server-side sessions bound
//! to a cookie, and provides axum extractors that work with any domain state
//! implementing `FromRef<S>` for `AuthBackend`.

mod backend;
mod claims;
mod config;
mod context;
mod error;
mod extractors;
mod jwt;
mod session;
mod types;
mod verifier;

pub use backend::{AuthBackend, LoginOutcome};
pub use claims::IdentityClaims;
pub use config::{AuthConfig, SessionConfig, SESSION_COOKIE_NAME};
pub use context::AuthContext;
pub use error::AuthError;
pub use extractors::SessionUser;
pub use session::SessionStore;
pub use types::{SessionRecord, VerifiedIdentity};
pub use verifier::{IdentityVerifier, JwtIdentityVerifier};
