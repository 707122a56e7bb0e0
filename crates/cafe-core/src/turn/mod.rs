//! Turn domain module.
//!
//! A turn is one request/response cycle: the channel hands the bot an
//! [`Activity`], the bot answers through the [`TurnContext`], and the
//! channel delivers whatever was sent.
//!
//! # Module Structure
//!
//! - `activity`: Incoming activity types (`Activity`, `ActivityKind`, `ChannelAccount`)
//! - `context`: Per-turn context that collects outgoing replies (`TurnContext`)
//! - `handler`: The `Bot` trait and its activity dispatch

mod activity;
mod context;
mod handler;

pub use activity::{Activity, ActivityKind, ChannelAccount};
pub use context::TurnContext;
pub use handler::Bot;
