//! State store trait and the conversation state accessor.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::model::ConversationData;
use crate::error::Result;

/// An abstract key-value store for conversation state.
///
/// This trait decouples the bots from the storage mechanism (memory, files,
/// a remote service). Keys are conversation ids.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Loads the state saved for a conversation.
    ///
    /// - `Ok(Some(data))`: state found
    /// - `Ok(None)`: nothing saved yet
    /// - `Err(_)`: the store could not be read
    async fn load(&self, conversation_id: &str) -> Result<Option<ConversationData>>;

    /// Saves (replaces) the state of a conversation.
    async fn save(&self, conversation_id: &str, data: &ConversationData) -> Result<()>;

    /// Deletes the state of a conversation. Deleting a missing key succeeds.
    async fn delete(&self, conversation_id: &str) -> Result<()>;
}

/// Turn-scoped accessor over a [`StateStore`].
///
/// A turn calls `get_or_create` when it starts, mutates the returned record,
/// and calls `save` once it has finished.
#[derive(Clone)]
pub struct ConversationState {
    store: Arc<dyn StateStore>,
}

impl ConversationState {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Loads the conversation's state, or a fresh record on its first turn.
    pub async fn get_or_create(&self, conversation_id: &str) -> Result<ConversationData> {
        match self.store.load(conversation_id).await? {
            Some(data) => Ok(data),
            None => {
                debug!(conversation_id, "creating conversation state");
                Ok(ConversationData::new())
            }
        }
    }

    pub async fn save(&self, conversation_id: &str, data: &ConversationData) -> Result<()> {
        self.store.save(conversation_id, data).await
    }

    pub async fn clear(&self, conversation_id: &str) -> Result<()> {
        self.store.delete(conversation_id).await
    }
}
