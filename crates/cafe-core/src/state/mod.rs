//! Conversation state domain module.
//!
//! - `model`: Per-conversation record (`ConversationData`)
//! - `repository`: Storage trait (`StateStore`) and the turn-scoped accessor (`ConversationState`)

pub mod model;
pub mod repository;

pub use model::ConversationData;
pub use repository::{ConversationState, StateStore};
