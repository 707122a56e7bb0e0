//! Bot implementations.
//!
//! - `cafe`: The Contoso Cafe bot (greeting, commands, reservation dialog)
//! - `echo`: The minimal reference bot that echoes messages with a turn counter

mod cafe;
mod echo;

pub use cafe::{CafeBot, CafeBotBuilder};
pub use echo::EchoBot;
