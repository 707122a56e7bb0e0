use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::dialog::{DialogOutcome, DialogTurn, ReservationDialog};
use crate::error::{CafeError, Result};
use crate::messages;
use crate::recognizer::{Intent, Recognizer};
use crate::reservation::{DateTimeResolver, FieldValidator, ReservationDraft};
use crate::router::{self, Command};
use crate::state::{ConversationData, ConversationState, StateStore};
use crate::turn::{Bot, ChannelAccount, TurnContext};

/// The Contoso Cafe bot.
///
/// Each message turn runs in this order:
/// 1. a cancel phrase ends any active dialog and nothing else happens;
/// 2. otherwise an active reservation dialog consumes the message;
/// 3. otherwise the fixed-phrase router picks a command, falling back to the
///    recognizer (when one is configured) for anything it does not know.
pub struct CafeBot {
    state: ConversationState,
    dialog: ReservationDialog,
    recognizer: Option<Arc<dyn Recognizer>>,
}

/// Builder for [`CafeBot`]. A state store is required.
#[derive(Default)]
pub struct CafeBotBuilder {
    store: Option<Arc<dyn StateStore>>,
    resolver: Option<DateTimeResolver>,
    recognizer: Option<Arc<dyn Recognizer>>,
}

impl CafeBotBuilder {
    pub fn state_store(mut self, store: Arc<dyn StateStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn resolver(mut self, resolver: DateTimeResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn recognizer(mut self, recognizer: Arc<dyn Recognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    pub fn build(self) -> Result<CafeBot> {
        let store = self
            .store
            .ok_or_else(|| CafeError::config("CafeBot requires a state store"))?;
        let validator = FieldValidator::new(self.resolver.unwrap_or_default());
        Ok(CafeBot {
            state: ConversationState::new(store),
            dialog: ReservationDialog::new(validator),
            recognizer: self.recognizer,
        })
    }
}

impl CafeBot {
    pub fn builder() -> CafeBotBuilder {
        CafeBotBuilder::default()
    }

    async fn process(
        &self,
        ctx: &mut TurnContext,
        text: &str,
        data: &mut ConversationData,
    ) -> Result<()> {
        let normalized = router::normalize(text);
        let command = router::route(&normalized);

        if command == Command::Cancel {
            Self::cancel(ctx, data);
            return Ok(());
        }

        if let Some(active) = data.active_dialog.take() {
            let turn = self.dialog.resume(active, text, ctx)?;
            Self::apply(turn, data);
            return Ok(());
        }

        match command {
            Command::Unknown => self.recognize(ctx, text, data).await,
            command => self.dispatch(command, ReservationDraft::new(), ctx, data),
        }
    }

    fn dispatch(
        &self,
        command: Command,
        seed: ReservationDraft,
        ctx: &mut TurnContext,
        data: &mut ConversationData,
    ) -> Result<()> {
        debug!(?command, "dispatching command");
        match command {
            Command::Greeting => ctx.send(messages::WHO_ARE_YOU),
            Command::Help => ctx.send(messages::HELP),
            Command::Cancel => Self::cancel(ctx, data),
            Command::BookTable => {
                let turn = self.dialog.begin(seed, ctx)?;
                Self::apply(turn, data);
            }
            Command::Unknown => {
                ctx.send(messages::DONT_UNDERSTAND);
                ctx.send(messages::HELP);
            }
        }
        Ok(())
    }

    async fn recognize(
        &self,
        ctx: &mut TurnContext,
        text: &str,
        data: &mut ConversationData,
    ) -> Result<()> {
        let Some(recognizer) = &self.recognizer else {
            return self.dispatch(Command::Unknown, ReservationDraft::new(), ctx, data);
        };

        let recognition = recognizer.recognize(text).await?;
        debug!(intent = ?recognition.intent, score = recognition.score, "recognized");
        let command = match recognition.intent {
            Intent::Book => Command::BookTable,
            Intent::Help => Command::Help,
            Intent::Cancel => Command::Cancel,
            Intent::Greeting => Command::Greeting,
            Intent::None => Command::Unknown,
        };
        self.dispatch(command, recognition.entities, ctx, data)
    }

    fn cancel(ctx: &mut TurnContext, data: &mut ConversationData) {
        match data.active_dialog.take() {
            Some(dialog) => {
                info!(dialog_id = %dialog.id, step = ?dialog.step, "reservation dialog cancelled");
                ctx.send(messages::CANCELLED);
            }
            None => ctx.send(messages::NOTHING_TO_CANCEL),
        }
    }

    fn apply(turn: DialogTurn, data: &mut ConversationData) {
        match turn {
            DialogTurn::Waiting(state) => data.active_dialog = Some(state),
            DialogTurn::Complete(DialogOutcome::Booked(reservation)) => {
                data.last_reservation = Some(reservation);
            }
            DialogTurn::Complete(DialogOutcome::Cancelled) => {}
        }
    }
}

#[async_trait]
impl Bot for CafeBot {
    async fn on_message(&self, ctx: &mut TurnContext, text: &str) -> Result<()> {
        let conversation_id = ctx.conversation_id().to_string();
        let mut data = self.state.get_or_create(&conversation_id).await?;
        data.turn_count += 1;

        self.process(ctx, text, &mut data).await?;

        debug!(
            %conversation_id,
            turn = data.turn_count,
            dialog_active = data.has_active_dialog(),
            "turn complete"
        );
        self.state.save(&conversation_id, &data).await
    }

    async fn on_members_added(
        &self,
        ctx: &mut TurnContext,
        members: &[ChannelAccount],
    ) -> Result<()> {
        for member in members {
            debug!(member = %member.name, "greeting new member");
            ctx.send(messages::WELCOME);
        }
        Ok(())
    }
}
