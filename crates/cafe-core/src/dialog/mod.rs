//! Reservation dialog.
//!
//! The multi-turn table booking flow, modelled as an explicit finite-state
//! machine over a keyed field store (the [`ReservationDraft`]).
//!
//! [`ReservationDraft`]: crate::reservation::ReservationDraft

mod reservation_dialog;
mod step;

pub use reservation_dialog::{DialogOutcome, DialogTurn, ReservationDialog, ReservationDialogState};
pub use step::DialogStep;
