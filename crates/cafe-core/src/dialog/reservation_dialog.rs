//! The reservation state machine.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::step::DialogStep;
use crate::error::{CafeError, Result};
use crate::messages;
use crate::reservation::{
    field_definition, FieldKey, FieldValidator, FieldValue, Reservation, ReservationDraft,
};
use crate::turn::TurnContext;

/// Persisted state of one dialog instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDialogState {
    /// Instance id, for log correlation
    pub id: String,
    /// The step waiting for input
    pub step: DialogStep,
    pub draft: ReservationDraft,
}

/// How a finished dialog ended.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogOutcome {
    /// The user confirmed; the reservation is booked.
    Booked(Reservation),
    /// The user declined at the confirmation step.
    Cancelled,
}

/// Result of driving the dialog for one turn.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogTurn {
    /// A prompt was sent; the dialog waits for the next input.
    Waiting(ReservationDialogState),
    Complete(DialogOutcome),
}

/// Drives the reservation flow:
/// `CollectLocation → CollectDateTime → CollectGuests → CollectName → Confirm`.
///
/// On entering a step the dialog first looks for a pre-seeded value in the
/// draft. If it validates the step is skipped without prompting. A rejected
/// input re-prompts for the same field; there is no retry limit.
#[derive(Debug, Clone, Default)]
pub struct ReservationDialog {
    validator: FieldValidator,
}

impl ReservationDialog {
    pub fn new(validator: FieldValidator) -> Self {
        Self { validator }
    }

    /// Starts a new dialog instance, optionally seeded with extracted entities.
    pub fn begin(&self, seed: ReservationDraft, ctx: &mut TurnContext) -> Result<DialogTurn> {
        let state = ReservationDialogState {
            id: Uuid::new_v4().to_string(),
            step: DialogStep::FIRST,
            draft: seed,
        };
        info!(
            dialog_id = %state.id,
            seeded_fields = state.draft.len(),
            "reservation dialog started"
        );
        self.advance(state, ctx)
    }

    /// Feeds one user input to the step that is waiting for it.
    pub fn resume(
        &self,
        mut state: ReservationDialogState,
        input: &str,
        ctx: &mut TurnContext,
    ) -> Result<DialogTurn> {
        let key = state.step.field();
        match self.validator.validate(key, &FieldValue::text(input)) {
            Ok(value) => {
                debug!(dialog_id = %state.id, field = %key, "field accepted");
                match state.step.next() {
                    Some(next) => {
                        state.draft.set(key, value);
                        state.step = next;
                        self.advance(state, ctx)
                    }
                    None => self.finish(state, value, ctx),
                }
            }
            Err(rejection) => {
                debug!(dialog_id = %state.id, field = %key, ?rejection, "field rejected");
                ctx.send(messages::retry_prompt(key, rejection));
                Ok(DialogTurn::Waiting(state))
            }
        }
    }

    /// Skips over steps whose field is already filled with a valid value,
    /// then prompts for the first one that is not.
    fn advance(
        &self,
        mut state: ReservationDialogState,
        ctx: &mut TurnContext,
    ) -> Result<DialogTurn> {
        loop {
            let key = state.step.field();
            let Some(seeded) = state.draft.get(key).cloned() else {
                self.prompt(&state, ctx)?;
                return Ok(DialogTurn::Waiting(state));
            };

            match self.validator.validate(key, &seeded) {
                Ok(value) => match state.step.next() {
                    Some(next) => {
                        debug!(dialog_id = %state.id, field = %key, "pre-seeded field accepted");
                        state.draft.set(key, value);
                        state.step = next;
                    }
                    None => return self.finish(state, value, ctx),
                },
                Err(rejection) => {
                    debug!(
                        dialog_id = %state.id,
                        field = %key,
                        ?rejection,
                        "pre-seeded field rejected"
                    );
                    state.draft.remove(key);
                    self.prompt(&state, ctx)?;
                    return Ok(DialogTurn::Waiting(state));
                }
            }
        }
    }

    fn prompt(&self, state: &ReservationDialogState, ctx: &mut TurnContext) -> Result<()> {
        let definition = field_definition(state.step.field());
        if state.step == DialogStep::Confirm {
            let summary = Self::summary(&state.draft).ok_or_else(|| {
                CafeError::internal("confirmation reached before all fields were collected")
            })?;
            ctx.send(format!("{} {}", summary, definition.prompt));
        } else {
            ctx.send(definition.prompt.clone());
        }
        Ok(())
    }

    fn summary(draft: &ReservationDraft) -> Option<String> {
        let location = match draft.get(FieldKey::Location)? {
            FieldValue::Location(location) => *location,
            _ => return None,
        };
        let slot = match draft.get(FieldKey::DateTime)? {
            FieldValue::Slot(slot) => *slot,
            _ => return None,
        };
        let guests = match draft.get(FieldKey::NumberOfGuests)? {
            FieldValue::Count(guests) => *guests,
            _ => return None,
        };
        let name = match draft.get(FieldKey::ReservationName)? {
            FieldValue::Text(name) => name.as_str(),
            _ => return None,
        };
        Some(messages::reservation_summary(location, &slot, guests, name))
    }

    fn finish(
        &self,
        state: ReservationDialogState,
        confirmation: FieldValue,
        ctx: &mut TurnContext,
    ) -> Result<DialogTurn> {
        match confirmation {
            FieldValue::Flag(true) => {
                let reservation = Reservation::from_draft(&state.draft).ok_or_else(|| {
                    CafeError::internal("confirmed reservation is missing collected fields")
                })?;
                info!(
                    dialog_id = %state.id,
                    location = %reservation.location,
                    guests = reservation.guests,
                    "reservation booked"
                );
                ctx.send(messages::booking_confirmed(&reservation));
                Ok(DialogTurn::Complete(DialogOutcome::Booked(reservation)))
            }
            _ => {
                info!(dialog_id = %state.id, "reservation cancelled at confirmation");
                ctx.send(messages::BOOKING_DECLINED);
                Ok(DialogTurn::Complete(DialogOutcome::Cancelled))
            }
        }
    }
}
