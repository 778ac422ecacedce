//! Mock Model Gateway Implementation
//!
//! Used by `LlmServiceFactory` when provider is `"mock"` and by router tests:
//! - `MockLlmService`: deterministic replies, programmable failure, request recording
//! - `MockImageService`: deterministic URLs, programmable failure, prompt recording

use std::sync::{Arc, Mutex, RwLock};

use crate::{
    CompletionRequest, CompletionResponse, GeneratedImage, ImageRequest, ImageService, LlmError,
    LlmService,
};

/// Model name reported by `MockLlmService`
pub const MOCK_MODEL: &str = "mock-model";

/// Mock LLM service for testing
#[derive(Debug, Clone, Default)]
pub struct MockLlmService {
    failure: Arc<RwLock<Option<String>>>,
    history: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockLlmService {
    /// Create a new mock LLM service
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `LlmError::Request(message)`
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write().unwrap() = Some(message.into());
    }

    /// Restore successful replies
    pub fn reset(&self) {
        *self.failure.write().unwrap() = None;
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.history.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        tracing::info!("Mock LLM service processing completion request");

        self.history.lock().unwrap().push(request.clone());

        if let Some(message) = self.failure.read().unwrap().clone() {
            return Err(LlmError::Request(message));
        }

        // Generate a simple response based on the last user message
        let last_message = request
            .messages
            .last()
            .map(|m| m.content.as_str())
            .unwrap_or("empty");

        let content = format!("Mock response to: {}", last_message);
        let input_tokens = request
            .messages
            .iter()
            .map(|m| m.content.len() as i32 / 4)
            .sum::<i32>();
        let output_tokens = content.len() as i32 / 4;

        Ok(CompletionResponse {
            content,
            model: MOCK_MODEL.to_string(),
            input_tokens,
            output_tokens,
        })
    }
}

/// Mock image service for testing
#[derive(Debug, Clone, Default)]
pub struct MockImageService {
    failure: Arc<RwLock<Option<String>>>,
    fixed_url: Arc<RwLock<Option<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockImageService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `LlmError::Request(message)`
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write().unwrap() = Some(message.into());
    }

    /// Always answer with `url`
    pub fn respond_with_url(&self, url: impl Into<String>) {
        *self.fixed_url.write().unwrap() = Some(url.into());
    }

    /// Restore default behavior
    pub fn reset(&self) {
        *self.failure.write().unwrap() = None;
        *self.fixed_url.write().unwrap() = None;
    }

    /// Prompts received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ImageService for MockImageService {
    async fn generate(&self, request: ImageRequest) -> Result<GeneratedImage, LlmError> {
        tracing::info!("Mock image service processing generation request");

        let sequence = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(request.prompt.clone());
            prompts.len()
        };

        if let Some(message) = self.failure.read().unwrap().clone() {
            return Err(LlmError::Request(message));
        }

        let url = self
            .fixed_url
            .read()
            .unwrap()
            .clone()
            .unwrap_or_else(|| format!("https://images.mock.local/{}.png", sequence));

        Ok(GeneratedImage { url })
    }
}
