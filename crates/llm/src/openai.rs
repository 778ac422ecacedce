//! OpenAI API Implementation
//!
//! Calls the Chat Completions API (`/v1/chat/completions`) and the Images API
//! (`/v1/images/generations`) using reqwest HTTP client.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    CompletionRequest, CompletionResponse, GeneratedImage, ImageRequest, ImageService, LlmConfig,
    LlmError, LlmRole, LlmService,
};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Chat Completions request body
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat Completions response body
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    model: String,
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: i32,
    completion_tokens: i32,
}

/// Images request body
#[derive(Debug, Serialize)]
struct ImageGenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
    quality: &'a str,
}

/// Images response body
#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

/// OpenAI API error response
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(rename = "type")]
    error_type: Option<String>,
    message: String,
}

/// OpenAI gateway: serves both chat completion and image generation
pub struct OpenAiService {
    client: Client,
    config: LlmConfig,
    base_url: String,
}

impl OpenAiService {
    /// Create a new OpenAI service with the configured request timeout
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, LlmError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Request(format!(
                        "Request timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else {
                    LlmError::Request(format!("HTTP request failed: {}", e))
                }
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimit);
        }

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());

            // Try to parse as API error
            if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&error_body) {
                return Err(LlmError::Response(format!(
                    "OpenAI API error ({}): {}",
                    error_response
                        .error
                        .error_type
                        .unwrap_or_else(|| status.to_string()),
                    error_response.error.message
                )));
            }

            return Err(LlmError::Response(format!(
                "OpenAI API returned {}: {}",
                status, error_body
            )));
        }

        Ok(response)
    }
}

#[async_trait::async_trait]
impl LlmService for OpenAiService {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let messages = request
            .messages
            .into_iter()
            .map(|m| ChatMessage {
                role: match m.role {
                    LlmRole::User => "user".to_string(),
                    LlmRole::Assistant => "assistant".to_string(),
                },
                content: m.content,
            })
            .collect();

        let body = ChatCompletionRequest {
            model: self.config.default_model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
        };

        tracing::debug!(model = %body.model, turns = body.messages.len(), "Sending chat completion request");

        let api_response: ChatCompletionResponse = self
            .post("/v1/chat/completions", &body)
            .await?
            .json()
            .await
            .map_err(|e| LlmError::Response(format!("Failed to parse response: {}", e)))?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::Response("Response contained no choices".to_string()))?;

        let (input_tokens, output_tokens) = api_response
            .usage
            .map(|u| (u.prompt_tokens, u.completion_tokens))
            .unwrap_or((0, 0));

        Ok(CompletionResponse {
            content: choice.message.content.unwrap_or_default(),
            model: api_response.model,
            input_tokens,
            output_tokens,
        })
    }
}

#[async_trait::async_trait]
impl ImageService for OpenAiService {
    async fn generate(&self, request: ImageRequest) -> Result<GeneratedImage, LlmError> {
        let body = ImageGenerationRequest {
            model: &self.config.image_model,
            prompt: &request.prompt,
            n: 1,
            size: &self.config.image_size,
            quality: &self.config.image_quality,
        };

        tracing::debug!(
            model = %self.config.image_model,
            size = %self.config.image_size,
            "Sending image generation request"
        );

        let api_response: ImageGenerationResponse = self
            .post("/v1/images/generations", &body)
            .await?
            .json()
            .await
            .map_err(|e| LlmError::Response(format!("Failed to parse response: {}", e)))?;

        let image = api_response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::Response("Response contained no images".to_string()))?;

        let url = image
            .url
            .ok_or_else(|| LlmError::Response("Image response has no URL".to_string()))?;

        Ok(GeneratedImage { url })
    }
}
