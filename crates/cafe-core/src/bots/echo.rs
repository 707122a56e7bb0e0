use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::messages;
use crate::state::ConversationState;
use crate::turn::{Bot, ChannelAccount, TurnContext};

/// Echoes every message back, prefixed with the conversation's turn number.
#[derive(Clone)]
pub struct EchoBot {
    state: ConversationState,
}

impl EchoBot {
    pub fn new(state: ConversationState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Bot for EchoBot {
    async fn on_message(&self, ctx: &mut TurnContext, text: &str) -> Result<()> {
        let conversation_id = ctx.conversation_id().to_string();
        let mut data = self.state.get_or_create(&conversation_id).await?;
        data.turn_count += 1;
        debug!(%conversation_id, turn = data.turn_count, "echo");

        ctx.send(messages::echo(data.turn_count, text));
        self.state.save(&conversation_id, &data).await
    }

    async fn on_members_added(
        &self,
        ctx: &mut TurnContext,
        members: &[ChannelAccount],
    ) -> Result<()> {
        for _ in members {
            ctx.send(messages::ECHO_WELCOME);
        }
        Ok(())
    }
}
