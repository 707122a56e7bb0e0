//! Core domain of the Contoso Cafe bot.
//!
//! The bots are driven one turn at a time through the [`Bot`] trait. State is
//! kept behind the [`StateStore`] trait and natural-language understanding
//! behind [`Recognizer`], so storage and NLU backends live outside this crate.

pub mod bots;
pub mod config;
pub mod dialog;
pub mod error;
pub mod messages;
pub mod recognizer;
pub mod reservation;
pub mod router;
pub mod state;
pub mod turn;

// Re-export common types
pub use bots::{CafeBot, EchoBot};
pub use error::CafeError;
pub use recognizer::{KeywordRecognizer, Recognizer};
pub use state::{ConversationData, ConversationState, StateStore};
pub use turn::{Activity, Bot, ChannelAccount, TurnContext};
