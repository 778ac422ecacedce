//! Chatbridge Model Gateway
//!
//! Forwards conversations and prompts to hosted generative APIs:
//! - OpenAI chat-completion and image-generation integration for production
//! - Mock services for testing and development
//! - Provider selection from environment configuration

pub mod mock;
pub mod openai;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_CHAT_MODEL: &str = "gpt-4o";
const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";
const DEFAULT_IMAGE_SIZE: &str = "1024x1024";
const DEFAULT_IMAGE_QUALITY: &str = "standard";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM configuration error: {0}")]
    Configuration(String),

    #[error("LLM request error: {0}")]
    Request(String),

    #[error("LLM response error: {0}")]
    Response(String),

    #[error("LLM rate limit exceeded")]
    RateLimit,
}

/// Speaker of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmRole {
    User,
    Assistant,
}

/// One turn sent to the chat-completion API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmMessage {
    pub role: LlmRole,
    pub content: String,
}

/// Chat-completion request, sent to the configured chat model
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Full ordered conversation, replayed verbatim
    pub messages: Vec<LlmMessage>,
}

impl CompletionRequest {
    pub fn new(messages: Vec<LlmMessage>) -> Self {
        Self { messages }
    }
}

/// Chat-completion result
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
    pub input_tokens: i32,
    pub output_tokens: i32,
}

/// Image-generation request: always one square image
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest {
    pub prompt: String,
}

/// Image-generation result
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    pub url: String,
}

/// Chat-completion backend
#[async_trait::async_trait]
pub trait LlmService: Send + Sync {
    /// Send the conversation and return the assistant's reply. No retry.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}

/// Image-generation backend
#[async_trait::async_trait]
pub trait ImageService: Send + Sync {
    /// Generate one image for `request.prompt` and return its URL. No retry.
    async fn generate(&self, request: ImageRequest) -> Result<GeneratedImage, LlmError>;
}

/// Model gateway configuration
#[derive(Clone)]
pub struct LlmConfig {
    /// Provider name (openai, mock)
    pub provider: String,
    pub api_key: String,
    /// Override for the API host (proxies, tests)
    pub base_url: Option<String>,
    /// Chat model for every completion
    pub default_model: String,
    pub image_model: String,
    /// Square size, e.g. `1024x1024`
    pub image_size: String,
    pub image_quality: String,
    /// Completion length cap; provider default when unset
    pub max_tokens: Option<u32>,
    /// Bound on every upstream call
    pub timeout: Duration,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("image_model", &self.image_model)
            .field("image_size", &self.image_size)
            .field("image_quality", &self.image_quality)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            api_key: String::new(),
            base_url: None,
            default_model: DEFAULT_CHAT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            image_size: DEFAULT_IMAGE_SIZE.to_string(),
            image_quality: DEFAULT_IMAGE_QUALITY.to_string(),
            max_tokens: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl LlmConfig {
    /// Create gateway config from environment variables
    pub fn from_env() -> Result<Self, LlmError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let provider = std::env::var("LLM_PROVIDER").unwrap_or(defaults.provider);
        let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();

        if provider == "openai" && api_key.is_empty() {
            return Err(LlmError::Configuration(
                "OPENAI_API_KEY is required for the openai provider".to_string(),
            ));
        }

        let image_size =
            std::env::var("IMAGE_SIZE").unwrap_or_else(|_| DEFAULT_IMAGE_SIZE.to_string());
        validate_square_size(&image_size)?;

        let max_tokens = match std::env::var("LLM_MAX_TOKENS") {
            Ok(value) => Some(value.parse::<u32>().map_err(|e| {
                LlmError::Configuration(format!("LLM_MAX_TOKENS must be an integer: {}", e))
            })?),
            Err(_) => None,
        };

        let timeout_secs = match std::env::var("LLM_TIMEOUT_SECS") {
            Ok(value) => value.parse::<u64>().map_err(|e| {
                LlmError::Configuration(format!("LLM_TIMEOUT_SECS must be an integer: {}", e))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            provider,
            api_key,
            base_url: std::env::var("OPENAI_BASE_URL").ok(),
            default_model: std::env::var("CHAT_MODEL").unwrap_or(defaults.default_model),
            image_model: std::env::var("IMAGE_MODEL").unwrap_or(defaults.image_model),
            image_size,
            image_quality: std::env::var("IMAGE_QUALITY").unwrap_or(defaults.image_quality),
            max_tokens,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Image sizes must be `NxN`
fn validate_square_size(size: &str) -> Result<(), LlmError> {
    let square = size
        .split_once('x')
        .map(|(w, h)| w == h && !w.is_empty() && w.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false);

    if square {
        Ok(())
    } else {
        Err(LlmError::Configuration(format!(
            "IMAGE_SIZE must be a square size like 1024x1024, got {}",
            size
        )))
    }
}

/// Text and image backends built from one configuration
#[derive(Clone)]
pub struct ModelGateway {
    pub llm: Arc<dyn LlmService>,
    pub images: Arc<dyn ImageService>,
}

/// Factory for creating gateway implementations
pub struct LlmServiceFactory;

impl LlmServiceFactory {
    pub fn create(config: LlmConfig) -> Result<ModelGateway, LlmError> {
        match config.provider.as_str() {
            "openai" => {
                tracing::info!(
                    model = %config.default_model,
                    image_model = %config.image_model,
                    "Creating OpenAI model gateway"
                );
                let service = Arc::new(openai::OpenAiService::new(config)?);
                Ok(ModelGateway {
                    llm: service.clone(),
                    images: service,
                })
            }
            "mock" => {
                tracing::info!("Creating mock model gateway");
                Ok(ModelGateway {
                    llm: Arc::new(mock::MockLlmService::new()),
                    images: Arc::new(mock::MockImageService::new()),
                })
            }
            provider => Err(LlmError::Configuration(format!(
                "Unknown LLM provider: {}. Supported providers: openai, mock",
                provider
            ))),
        }
    }
}
