//! Domain entities for Conversations domain
//!
//! A conversation is the ordered list of role-tagged messages exchanged
//! between one user and the assistant. Order is significant: the whole list
//! is replayed to the chat-completion API on every turn.

use chatbridge_llm::{LlmMessage, LlmRole};
use serde::{Deserialize, Serialize};

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl From<MessageRole> for LlmRole {
    fn from(role: MessageRole) -> Self {
        match role {
            MessageRole::User => LlmRole::User,
            MessageRole::Assistant => LlmRole::Assistant,
        }
    }
}

/// Message entity. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Create a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

impl From<&Message> for LlmMessage {
    fn from(message: &Message) -> Self {
        LlmMessage {
            role: message.role.into(),
            content: message.content.clone(),
        }
    }
}

/// Conversation entity: one user's ordered message history.
///
/// Grows by appending only; never truncated or deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Replace the whole history (used when restoring from the document store)
    pub fn replace(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    /// The history in the gateway's wire shape, oldest first
    pub fn to_llm_messages(&self) -> Vec<LlmMessage> {
        self.messages.iter().map(LlmMessage::from).collect()
    }
}
