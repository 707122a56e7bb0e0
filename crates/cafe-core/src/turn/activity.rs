//! Incoming activity types.

use serde::{Deserialize, Serialize};

/// A participant of a conversation (a user or the bot itself).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelAccount {
    /// Channel-scoped identifier
    pub id: String,
    /// Display name
    pub name: String,
}

impl ChannelAccount {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// What happened on the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ActivityKind {
    /// A user sent a text message.
    Message { text: String },
    /// Members joined the conversation. The bot itself is usually among them.
    #[serde(rename_all = "camelCase")]
    ConversationUpdate { members_added: Vec<ChannelAccount> },
}

/// A single incoming event delivered by the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Key used to scope conversation state
    pub conversation_id: String,
    /// Sender of the activity
    pub from: ChannelAccount,
    /// The bot account receiving the activity
    pub recipient: ChannelAccount,
    #[serde(flatten)]
    pub kind: ActivityKind,
}

impl Activity {
    /// Creates a message activity.
    pub fn message(
        conversation_id: impl Into<String>,
        from: ChannelAccount,
        recipient: ChannelAccount,
        text: impl Into<String>,
    ) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            from,
            recipient,
            kind: ActivityKind::Message { text: text.into() },
        }
    }

    /// Creates a conversation update announcing the given members.
    pub fn conversation_update(
        conversation_id: impl Into<String>,
        from: ChannelAccount,
        recipient: ChannelAccount,
        members_added: Vec<ChannelAccount>,
    ) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            from,
            recipient,
            kind: ActivityKind::ConversationUpdate { members_added },
        }
    }

    /// Returns the message text, if this is a message activity.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            ActivityKind::Message { text } => Some(text),
            ActivityKind::ConversationUpdate { .. } => None,
        }
    }
}
