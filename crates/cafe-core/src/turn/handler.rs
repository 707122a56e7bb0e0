//! The bot trait and activity dispatch.

use async_trait::async_trait;
use tracing::debug;

use super::activity::{ActivityKind, ChannelAccount};
use super::context::TurnContext;
use crate::error::Result;

/// A conversational bot driven one turn at a time.
///
/// Implementors provide `on_message` and optionally `on_members_added`. The
/// provided `on_turn` routes system events and messages to them.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Processes one incoming activity to completion.
    ///
    /// Conversation updates go to `on_members_added` with the bot's own
    /// account filtered out; updates that only announce the bot are ignored.
    async fn on_turn(&self, ctx: &mut TurnContext) -> Result<()> {
        match ctx.activity().kind.clone() {
            ActivityKind::Message { text } => {
                debug!(conversation_id = %ctx.conversation_id(), "dispatching message");
                self.on_message(ctx, &text).await
            }
            ActivityKind::ConversationUpdate { members_added } => {
                let bot_id = ctx.activity().recipient.id.clone();
                let joined: Vec<ChannelAccount> = members_added
                    .into_iter()
                    .filter(|member| member.id != bot_id)
                    .collect();
                if joined.is_empty() {
                    return Ok(());
                }
                debug!(
                    conversation_id = %ctx.conversation_id(),
                    count = joined.len(),
                    "dispatching members added"
                );
                self.on_members_added(ctx, &joined).await
            }
        }
    }

    /// Handles a text message.
    async fn on_message(&self, ctx: &mut TurnContext, text: &str) -> Result<()>;

    /// Handles users joining the conversation.
    async fn on_members_added(
        &self,
        _ctx: &mut TurnContext,
        _members: &[ChannelAccount],
    ) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turn::Activity;

    struct RecordingBot;

    #[async_trait]
    impl Bot for RecordingBot {
        async fn on_message(&self, ctx: &mut TurnContext, text: &str) -> Result<()> {
            ctx.send(format!("message:{}", text));
            Ok(())
        }

        async fn on_members_added(
            &self,
            ctx: &mut TurnContext,
            members: &[ChannelAccount],
        ) -> Result<()> {
            for member in members {
                ctx.send(format!("joined:{}", member.name));
            }
            Ok(())
        }
    }

    fn bot_account() -> ChannelAccount {
        ChannelAccount::new("bot", "Contoso Cafe")
    }

    #[tokio::test]
    async fn test_message_is_dispatched_to_on_message() {
        let user = ChannelAccount::new("u", "Alex");
        let activity = Activity::message("c", user, bot_account(), "hi");
        let mut ctx = TurnContext::new(activity);
        RecordingBot.on_turn(&mut ctx).await.unwrap();
        assert_eq!(ctx.responses(), ["message:hi"]);
    }

    #[tokio::test]
    async fn test_bot_is_filtered_from_members_added() {
        let activity = Activity::conversation_update(
            "c",
            ChannelAccount::new("u", "Alex"),
            bot_account(),
            vec![bot_account(), ChannelAccount::new("u", "Alex")],
        );
        let mut ctx = TurnContext::new(activity);
        RecordingBot.on_turn(&mut ctx).await.unwrap();
        assert_eq!(ctx.responses(), ["joined:Alex"]);
    }

    #[tokio::test]
    async fn test_update_with_only_the_bot_is_ignored() {
        let activity = Activity::conversation_update(
            "c",
            bot_account(),
            bot_account(),
            vec![bot_account()],
        );
        let mut ctx = TurnContext::new(activity);
        RecordingBot.on_turn(&mut ctx).await.unwrap();
        assert!(ctx.responses().is_empty());
    }
}
