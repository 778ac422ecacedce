//! In-memory history repository, used when no database is configured

use std::collections::HashMap;

use chatbridge_common::RepositoryError;
use tokio::sync::RwLock;

use super::HistoryRepository;
use crate::domain::entities::Message;

#[derive(Debug, Default)]
pub struct InMemoryHistoryRepository {
    documents: RwLock<HashMap<String, Vec<Message>>>,
}

impl InMemoryHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn load(&self, user_id: &str) -> Result<Option<Vec<Message>>, RepositoryError> {
        Ok(self.documents.read().await.get(user_id).cloned())
    }

    async fn save(&self, user_id: &str, messages: &[Message]) -> Result<(), RepositoryError> {
        self.documents
            .write()
            .await
            .insert(user_id.to_string(), messages.to_vec());
        Ok(())
    }
}
