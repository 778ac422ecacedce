//! Common test utilities and fixtures for integration tests
//!
//! This module provides shared infrastructure for all integration tests including:
//! - A composed router backed by mock model services and an in-memory history store
//! - Identity token minting and login helpers
//! - An always-failing history store
//! - Response parsing helpers

use std::env;
use std::sync::{Arc, Once};

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use chatbridge_auth::{AuthBackend, AuthConfig, IdentityClaims, JwtIdentityVerifier, SessionConfig};
use chatbridge_common::RepositoryError;
use chatbridge_conversations::{
    ChatState, ConversationStore, HistoryRepository, InMemoryHistoryRepository, KeywordClassifier,
    Message,
};
use chatbridge_llm::mock::{MockImageService, MockLlmService};
use chatbridge_llm::ModelGateway;
use serde_json::Value;
use tower::ServiceExt;

static INIT: Once = Once::new();

/// Test environment configuration
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Only set when a PostgreSQL instance is available for the ignored tests
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub audience: String,
}

impl TestConfig {
    pub fn from_env() -> Self {
        // Ensure test environment variables are loaded
        INIT.call_once(|| {
            dotenvy::from_filename(".env.test").ok();
            dotenvy::dotenv().ok();
        });

        Self {
            database_url: env::var("TEST_DATABASE_URL").ok(),
            jwt_secret: env::var("TEST_JWT_SECRET")
                .unwrap_or_else(|_| "test_secret_key_for_testing_only".to_string()),
            audience: "chatbridge-test".to_string(),
        }
    }
}

/// Test application: the full router plus handles on its collaborators
pub struct TestApp {
    pub router: Router,
    pub state: ChatState,
    pub config: TestConfig,
    pub llm: MockLlmService,
    pub images: MockImageService,
    pub repository: Arc<dyn HistoryRepository>,
}

impl TestApp {
    /// Create a new test application with an empty in-memory history store
    pub fn new() -> Self {
        Self::with_repository(Arc::new(InMemoryHistoryRepository::new()))
    }

    /// Create a test application over an existing history store, as a
    /// restarted process would see it
    pub fn with_repository(repository: Arc<dyn HistoryRepository>) -> Self {
        let config = TestConfig::from_env();
        let llm = MockLlmService::new();
        let images = MockImageService::new();
        Self::assemble(
            config,
            repository,
            ModelGateway {
                llm: Arc::new(llm.clone()),
                images: Arc::new(images.clone()),
            },
            llm,
            images,
        )
    }

    /// Create a test application over a custom model gateway
    pub fn with_gateway(gateway: ModelGateway) -> Self {
        Self::assemble(
            TestConfig::from_env(),
            Arc::new(InMemoryHistoryRepository::new()),
            gateway,
            MockLlmService::new(),
            MockImageService::new(),
        )
    }

    fn assemble(
        config: TestConfig,
        repository: Arc<dyn HistoryRepository>,
        gateway: ModelGateway,
        llm: MockLlmService,
        images: MockImageService,
    ) -> Self {
        let auth_config = AuthConfig {
            jwt_secret: config.jwt_secret.clone(),
            issuer: None,
            audience: Some(config.audience.clone()),
        };
        let auth = AuthBackend::new(
            Arc::new(JwtIdentityVerifier::new(auth_config)),
            SessionConfig::default(),
        );

        let state = ChatState::new(
            Arc::new(ConversationStore::new(repository.clone())),
            Arc::new(KeywordClassifier::new()),
            gateway,
            auth,
        );

        Self {
            router: chatbridge_app::build_router(state.clone()),
            state,
            config,
            llm,
            images,
            repository,
        }
    }

    /// Send one request through a clone of the router
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Mint an identity token for `user_id`
    pub fn identity_token(&self, user_id: &str) -> String {
        create_identity_token(user_id, &self.config.jwt_secret, &self.config.audience).unwrap()
    }

    /// Log in as `user_id` and return the `Cookie` header value for the session
    pub async fn login(&self, user_id: &str) -> String {
        let response = self.send(login_request(&self.identity_token(user_id))).await;
        assert_eq!(response.status(), StatusCode::OK);
        session_cookie(&response).expect("login should set a session cookie")
    }
}

/// History store whose every read and write fails
pub struct OfflineRepository;

#[async_trait::async_trait]
impl HistoryRepository for OfflineRepository {
    async fn load(
        &self,
        _user_id: &str,
    ) -> std::result::Result<Option<Vec<Message>>, RepositoryError> {
        Err(RepositoryError::InvalidData("store offline".to_string()))
    }

    async fn save(
        &self,
        _user_id: &str,
        _messages: &[Message],
    ) -> std::result::Result<(), RepositoryError> {
        Err(RepositoryError::InvalidData("store offline".to_string()))
    }
}

/// Create an HS256 identity token the way the identity provider would
pub fn create_identity_token(user_id: &str, secret: &str, audience: &str) -> Result<String> {
    use jsonwebtoken::{Algorithm, EncodingKey, Header};

    let now = chrono::Utc::now().timestamp() as u64;

    let claims = IdentityClaims {
        sub: user_id.to_string(),
        email: Some(format!("{}@chatbridge.test", user_id)),
        iat: now,
        exp: now + 3600, // 1 hour
        iss: None,
        aud: Some(audience.to_string()),
    };

    let header = Header::new(Algorithm::HS256);
    let encoding_key = EncodingKey::from_secret(secret.as_ref());

    Ok(jsonwebtoken::encode(&header, &claims, &encoding_key)?)
}

/// `POST /login` with a JSON token body
pub fn login_request(token: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::json!({ "token": token }).to_string()))
        .unwrap()
}

/// Form-encoded POST carrying `message`, with an optional session cookie
pub fn message_request(uri: &str, cookie: Option<&str>, message: &str) -> Request<Body> {
    let body = serde_urlencoded::to_string([("message", message)]).unwrap();
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body)).unwrap()
}

/// Bodyless request with an optional session cookie
pub fn plain_request(method: Method, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// `name=value` of the first `Set-Cookie` header, ready for a `Cookie` header
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .next()
        .map(|pair| pair.trim().to_string())
}

/// Parse response body as JSON Value
pub async fn parse_body(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Read response body as text
pub async fn body_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_identity_token_is_accepted() {
        let app = TestApp::new();
        let cookie = app.login("user-1").await;
        assert!(cookie.starts_with("chatbridge_session="));
    }
}
