//! Repository implementations for Conversations domain
//!
//! Conversation history is persisted as one document per user: the whole
//! ordered message list, overwritten on every save.

pub mod histories;
pub mod memory;

use chatbridge_common::RepositoryError;

use crate::domain::entities::Message;

pub use histories::PgHistoryRepository;
pub use memory::InMemoryHistoryRepository;

/// Document store for per-user conversation history
#[async_trait::async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Load the stored history for `user_id`. `None` when nothing was saved.
    async fn load(&self, user_id: &str) -> Result<Option<Vec<Message>>, RepositoryError>;

    /// Overwrite the stored history for `user_id` with `messages`.
    async fn save(&self, user_id: &str, messages: &[Message]) -> Result<(), RepositoryError>;
}
