//! Per-turn context.

use super::activity::Activity;

/// Context for a single turn.
///
/// Holds the incoming activity and collects every reply the bot sends. The
/// channel drains the replies once the turn has been processed to completion.
#[derive(Debug, Clone)]
pub struct TurnContext {
    activity: Activity,
    responses: Vec<String>,
}

impl TurnContext {
    pub fn new(activity: Activity) -> Self {
        Self {
            activity,
            responses: Vec::new(),
        }
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn conversation_id(&self) -> &str {
        &self.activity.conversation_id
    }

    /// Queues a reply activity for the channel.
    pub fn send(&mut self, text: impl Into<String>) {
        self.responses.push(text.into());
    }

    /// Replies sent so far this turn.
    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    pub fn into_responses(self) -> Vec<String> {
        self.responses
    }
}
