//! In-memory state store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use cafe_core::error::Result;
use cafe_core::state::{ConversationData, StateStore};
use tokio::sync::RwLock;

/// Keeps conversation state in process memory. Lost on exit.
#[derive(Clone, Default)]
pub struct MemoryStateStore {
    conversations: Arc<RwLock<HashMap<String, ConversationData>>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of conversations currently held.
    pub async fn len(&self) -> usize {
        self.conversations.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.conversations.read().await.is_empty()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn load(&self, conversation_id: &str) -> Result<Option<ConversationData>> {
        Ok(self.conversations.read().await.get(conversation_id).cloned())
    }

    async fn save(&self, conversation_id: &str, data: &ConversationData) -> Result<()> {
        self.conversations
            .write()
            .await
            .insert(conversation_id.to_string(), data.clone());
        Ok(())
    }

    async fn delete(&self, conversation_id: &str) -> Result<()> {
        self.conversations.write().await.remove(conversation_id);
        Ok(())
    }
}
