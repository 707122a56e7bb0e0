use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cafe_core::dialog::DialogStep;
use cafe_core::error::Result;
use cafe_core::messages;
use cafe_core::reservation::{FieldKey, FieldValue, Location, RESERVATION_REFERENCE};
use cafe_core::{
    Activity, Bot, CafeBot, ChannelAccount, ConversationData, EchoBot, KeywordRecognizer,
    StateStore, TurnContext,
};

// Mock StateStore for testing
#[derive(Default)]
struct MockStateStore {
    conversations: Mutex<HashMap<String, ConversationData>>,
}

impl MockStateStore {
    fn get(&self, conversation_id: &str) -> Option<ConversationData> {
        self.conversations
            .lock()
            .unwrap()
            .get(conversation_id)
            .cloned()
    }
}

#[async_trait]
impl StateStore for MockStateStore {
    async fn load(&self, conversation_id: &str) -> Result<Option<ConversationData>> {
        Ok(self.get(conversation_id))
    }

    async fn save(&self, conversation_id: &str, data: &ConversationData) -> Result<()> {
        self.conversations
            .lock()
            .unwrap()
            .insert(conversation_id.to_string(), data.clone());
        Ok(())
    }

    async fn delete(&self, conversation_id: &str) -> Result<()> {
        self.conversations.lock().unwrap().remove(conversation_id);
        Ok(())
    }
}

const CONVERSATION: &str = "conv-1";

fn user() -> ChannelAccount {
    ChannelAccount::new("user-1", "Alex")
}

fn bot_account() -> ChannelAccount {
    ChannelAccount::new("bot", "Contoso Cafe")
}

async fn say(bot: &dyn Bot, text: &str) -> Vec<String> {
    let mut ctx = TurnContext::new(Activity::message(CONVERSATION, user(), bot_account(), text));
    bot.on_turn(&mut ctx).await.expect("turn should succeed");
    ctx.into_responses()
}

fn cafe_bot(store: Arc<MockStateStore>) -> CafeBot {
    CafeBot::builder().state_store(store).build().unwrap()
}

#[tokio::test]
async fn test_build_without_state_store_fails() {
    let err = CafeBot::builder().build().err().expect("missing store must fail");
    assert!(err.is_config());
}

#[tokio::test]
async fn test_greets_user_on_join() {
    let bot = cafe_bot(Arc::new(MockStateStore::default()));
    let mut ctx = TurnContext::new(Activity::conversation_update(
        CONVERSATION,
        user(),
        bot_account(),
        vec![bot_account(), user()],
    ));
    bot.on_turn(&mut ctx).await.unwrap();
    assert_eq!(ctx.responses(), [messages::WELCOME]);
}

#[tokio::test]
async fn test_help_sends_help_text() {
    let bot = cafe_bot(Arc::new(MockStateStore::default()));
    assert_eq!(say(&bot, "  HELP ").await, [messages::HELP]);
}

#[tokio::test]
async fn test_who_are_you() {
    let bot = cafe_bot(Arc::new(MockStateStore::default()));
    assert_eq!(say(&bot, "Who are you?").await, [messages::WHO_ARE_YOU]);
}

#[tokio::test]
async fn test_unknown_text_falls_back_to_help() {
    let bot = cafe_bot(Arc::new(MockStateStore::default()));
    assert_eq!(
        say(&bot, "what's on the menu").await,
        [messages::DONT_UNDERSTAND, messages::HELP]
    );
}

#[tokio::test]
async fn test_cancel_without_dialog() {
    let bot = cafe_bot(Arc::new(MockStateStore::default()));
    assert_eq!(say(&bot, "cancel").await, [messages::NOTHING_TO_CANCEL]);
}

#[tokio::test]
async fn test_booking_end_to_end() {
    let store = Arc::new(MockStateStore::default());
    let bot = cafe_bot(store.clone());

    let mut last = Vec::new();
    for input in ["book a table", "Seattle", "tomorrow evening", "4", "Alex", "yes"] {
        last = say(&bot, input).await;
        assert_eq!(last.len(), 1, "one reply per turn for input {:?}", input);
    }

    assert!(last[0].contains(RESERVATION_REFERENCE));
    let data = store.get(CONVERSATION).unwrap();
    assert_eq!(data.turn_count, 6);
    assert!(data.active_dialog.is_none());
    let reservation = data.last_reservation.expect("reservation persisted");
    assert_eq!(reservation.location, Location::Seattle);
    assert_eq!(reservation.guests, 4);
    assert_eq!(reservation.name, "Alex");
}

#[tokio::test]
async fn test_declining_confirmation_persists_nothing() {
    let store = Arc::new(MockStateStore::default());
    let bot = cafe_bot(store.clone());

    let mut last = Vec::new();
    for input in ["book a table", "Seattle", "tomorrow evening", "4", "Alex", "no"] {
        last = say(&bot, input).await;
    }

    assert_eq!(last, [messages::BOOKING_DECLINED]);
    let data = store.get(CONVERSATION).unwrap();
    assert!(data.active_dialog.is_none());
    assert!(data.last_reservation.is_none());
}

#[tokio::test]
async fn test_location_is_stored_with_canonical_casing() {
    let store = Arc::new(MockStateStore::default());
    let bot = cafe_bot(store.clone());

    say(&bot, "book a table").await;
    say(&bot, "rEdMoNd").await;

    let dialog = store.get(CONVERSATION).unwrap().active_dialog.unwrap();
    assert_eq!(dialog.step, DialogStep::CollectDateTime);
    assert_eq!(
        dialog.draft.get(FieldKey::Location),
        Some(&FieldValue::Location(Location::Redmond))
    );
}

#[tokio::test]
async fn test_out_of_range_guests_reprompt() {
    let store = Arc::new(MockStateStore::default());
    let bot = cafe_bot(store.clone());

    for input in ["book a table", "Renton", "tomorrow at 6pm"] {
        say(&bot, input).await;
    }
    let replies = say(&bot, "13").await;
    assert!(replies[0].contains("at most 12"));
    let replies = say(&bot, "0").await;
    assert!(replies[0].contains("at least 1"));

    let dialog = store.get(CONVERSATION).unwrap().active_dialog.unwrap();
    assert_eq!(dialog.step, DialogStep::CollectGuests);
}

#[tokio::test]
async fn test_cancel_phrase_ends_dialog_at_any_step() {
    let answers = ["book a table", "Bellevue", "tomorrow evening", "3", "Sam"];
    let steps = [
        DialogStep::CollectLocation,
        DialogStep::CollectDateTime,
        DialogStep::CollectGuests,
        DialogStep::CollectName,
        DialogStep::Confirm,
    ];

    for (answered, step) in steps.into_iter().enumerate() {
        for phrase in ["cancel", "stop", "Start Over"] {
            let store = Arc::new(MockStateStore::default());
            let bot = cafe_bot(store.clone());

            for input in &answers[..=answered] {
                say(&bot, input).await;
            }
            let dialog = store.get(CONVERSATION).unwrap().active_dialog.unwrap();
            assert_eq!(dialog.step, step);

            let replies = say(&bot, phrase).await;
            assert_eq!(replies, [messages::CANCELLED], "{:?} at {:?}", phrase, step);
            let data = store.get(CONVERSATION).unwrap();
            assert!(data.active_dialog.is_none());
            assert!(data.last_reservation.is_none());

            // A later "yes" must not book anything.
            say(&bot, "yes").await;
            assert!(store.get(CONVERSATION).unwrap().last_reservation.is_none());
        }
    }
}

#[tokio::test]
async fn test_help_inside_dialog_is_field_input() {
    let store = Arc::new(MockStateStore::default());
    let bot = cafe_bot(store.clone());

    say(&bot, "book a table").await;
    let replies = say(&bot, "help").await;

    assert!(replies[0].starts_with("Sorry, we don't have a cafe there"));
    let dialog = store.get(CONVERSATION).unwrap().active_dialog.unwrap();
    assert_eq!(dialog.step, DialogStep::CollectLocation);
}

#[tokio::test]
async fn test_recognizer_seeds_dialog_fast_path() {
    let store = Arc::new(MockStateStore::default());
    let bot = CafeBot::builder()
        .state_store(store.clone())
        .recognizer(Arc::new(KeywordRecognizer::default()))
        .build()
        .unwrap();

    let replies = say(&bot, "Can I reserve a table in Seattle for 2 tomorrow at 7pm?").await;
    assert_eq!(replies.len(), 1);
    assert!(replies[0].starts_with("What name should I put"));

    let dialog = store.get(CONVERSATION).unwrap().active_dialog.unwrap();
    assert_eq!(dialog.step, DialogStep::CollectName);

    say(&bot, "Jordan").await;
    let replies = say(&bot, "yes").await;
    assert!(replies[0].contains(RESERVATION_REFERENCE));
    let reservation = store.get(CONVERSATION).unwrap().last_reservation.unwrap();
    assert_eq!(reservation.guests, 2);
    assert_eq!(reservation.name, "Jordan");
}

#[tokio::test]
async fn test_recognizer_none_falls_back() {
    let bot = CafeBot::builder()
        .state_store(Arc::new(MockStateStore::default()))
        .recognizer(Arc::new(KeywordRecognizer::default()))
        .build()
        .unwrap();
    assert_eq!(
        say(&bot, "sing me a song").await,
        [messages::DONT_UNDERSTAND, messages::HELP]
    );
}

#[tokio::test]
async fn test_echo_bot_counts_turns() {
    let store = Arc::new(MockStateStore::default());
    let bot = EchoBot::new(cafe_core::ConversationState::new(store.clone()));

    assert_eq!(say(&bot, "hello").await, ["Turn 1: You sent 'hello'"]);
    assert_eq!(say(&bot, "again").await, ["Turn 2: You sent 'again'"]);
    assert_eq!(store.get(CONVERSATION).unwrap().turn_count, 2);
}
