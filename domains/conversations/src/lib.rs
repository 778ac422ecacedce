//! Conversations domain: chat routing, intent classification, per-user history

pub mod api;
pub mod domain;
pub mod repository;
pub mod store;

// Re-export domain types at the crate root for convenience
pub use domain::classifier::{IntentClassifier, KeywordClassifier, IMAGE_KEYWORDS};
pub use domain::entities::{Conversation, Message, MessageRole};

// Re-export repository types
pub use repository::{HistoryRepository, InMemoryHistoryRepository, PgHistoryRepository};
pub use store::ConversationStore;

// Re-export API types
pub use api::routes;
pub use api::ChatState;
