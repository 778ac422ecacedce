//! Conversations domain state and auth backend integration

use std::sync::Arc;

use axum::extract::FromRef;
use chatbridge_auth::AuthBackend;
use chatbridge_llm::{ImageService, LlmService, ModelGateway};

use crate::domain::classifier::IntentClassifier;
use crate::store::ConversationStore;

/// Application state for the Conversations domain
#[derive(Clone)]
pub struct ChatState {
    pub store: Arc<ConversationStore>,
    pub classifier: Arc<dyn IntentClassifier>,
    pub llm: Arc<dyn LlmService>,
    pub images: Arc<dyn ImageService>,
    pub auth: AuthBackend,
}

impl ChatState {
    pub fn new(
        store: Arc<ConversationStore>,
        classifier: Arc<dyn IntentClassifier>,
        gateway: ModelGateway,
        auth: AuthBackend,
    ) -> Self {
        Self {
            store,
            classifier,
            llm: gateway.llm,
            images: gateway.images,
            auth,
        }
    }
}

impl FromRef<ChatState> for AuthBackend {
    fn from_ref(state: &ChatState) -> Self {
        state.auth.clone()
    }
}
