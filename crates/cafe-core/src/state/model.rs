//! Conversation state models.

use serde::{Deserialize, Serialize};

use crate::dialog::ReservationDialogState;
use crate::reservation::Reservation;

/// State kept for one conversation across turns.
///
/// Created on the first turn and saved after every turn. It is never
/// deleted by the bot; the store decides how long it lives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationData {
    /// Number of message turns processed so far.
    #[serde(default)]
    pub turn_count: u64,

    /// The reservation dialog in progress, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_dialog: Option<ReservationDialogState>,

    /// The most recent confirmed reservation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reservation: Option<Reservation>,
}

impl ConversationData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_active_dialog(&self) -> bool {
        self.active_dialog.is_some()
    }
}
