//! Per-user conversation store
//!
//! Holds every user's history in memory and mirrors it to a `HistoryRepository`.
//! Each user's conversation sits behind its own async mutex: a chat exchange
//! takes the lock for its whole read-call-append sequence, so concurrent
//! requests from the same user are serialized and never interleave their
//! user/assistant pairs. Different users never contend.

use std::collections::HashMap;
use std::sync::Arc;

use chatbridge_common::RepositoryError;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::domain::entities::{Conversation, Message, MessageRole};
use crate::repository::HistoryRepository;

pub struct ConversationStore {
    conversations: RwLock<HashMap<String, Arc<Mutex<Conversation>>>>,
    repository: Arc<dyn HistoryRepository>,
}

impl ConversationStore {
    pub fn new(repository: Arc<dyn HistoryRepository>) -> Self {
        Self {
            conversations: RwLock::new(HashMap::new()),
            repository,
        }
    }

    /// Get or create the slot for `user_id`
    async fn slot(&self, user_id: &str) -> Arc<Mutex<Conversation>> {
        if let Some(slot) = self.conversations.read().await.get(user_id) {
            return slot.clone();
        }

        self.conversations
            .write()
            .await
            .entry(user_id.to_string())
            .or_default()
            .clone()
    }

    /// Take exclusive access to `user_id`'s conversation.
    ///
    /// Hold the guard across an entire exchange; call [`Self::save`] with it
    /// still held to persist.
    pub async fn lock(&self, user_id: &str) -> OwnedMutexGuard<Conversation> {
        self.slot(user_id).await.lock_owned().await
    }

    /// Append one message to `user_id`'s history, creating it if absent
    pub async fn append(&self, user_id: &str, role: MessageRole, content: impl Into<String>) {
        self.lock(user_id).await.push(Message::new(role, content));
    }

    /// Snapshot of `user_id`'s history, oldest first. Empty when unknown.
    pub async fn history(&self, user_id: &str) -> Vec<Message> {
        let slot = self.conversations.read().await.get(user_id).cloned();
        match slot {
            Some(slot) => slot.lock().await.messages().to_vec(),
            None => Vec::new(),
        }
    }

    /// Write `conversation` to the document store under `user_id`
    pub async fn save(
        &self,
        user_id: &str,
        conversation: &Conversation,
    ) -> Result<(), RepositoryError> {
        self.repository.save(user_id, conversation.messages()).await
    }

    /// Write the current in-memory history for `user_id` to the document store
    pub async fn persist(&self, user_id: &str) -> Result<(), RepositoryError> {
        let conversation = self.lock(user_id).await;
        self.save(user_id, &conversation).await
    }

    /// Load `user_id`'s history from the document store into memory.
    ///
    /// Replaces whatever was held in memory. A user with no stored history
    /// restores to an empty conversation.
    pub async fn restore(&self, user_id: &str) -> Result<Vec<Message>, RepositoryError> {
        let mut conversation = self.lock(user_id).await;
        let messages = self.repository.load(user_id).await?.unwrap_or_default();

        tracing::info!(user_id = %user_id, count = messages.len(), "Restored conversation history");

        conversation.replace(messages.clone());
        Ok(messages)
    }
}
