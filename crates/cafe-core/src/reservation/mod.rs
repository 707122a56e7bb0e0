//! Reservation domain module.
//!
//! Everything needed to collect and validate a table reservation, independent
//! of how the conversation drives the collection.
//!
//! # Module Structure
//!
//! - `location`: The cafe locations that take reservations (`Location`)
//! - `field`: Field keys, values, the in-progress draft and the static field table
//! - `datetime`: Date/time expression resolution against the evening window
//! - `validator`: Per-field validation policies (`Rejection`, `FieldValidator`)
//! - `model`: Completed reservation (`Reservation`, `ReservationSlot`)

mod datetime;
mod field;
mod location;
mod model;
mod validator;

pub(crate) use datetime::followed_by_time_suffix;
pub use datetime::{Candidate, DateTimeResolver, TimeSpec, BOOKING_WINDOW_DAYS};
pub use field::{
    field_definition, field_definitions, FieldDefinition, FieldKey, FieldValue, ReservationDraft,
    ValueKind,
};
pub use location::Location;
pub use model::{Reservation, ReservationSlot, RESERVATION_REFERENCE};
pub use validator::{
    validate_confirmation, validate_guests, validate_location, validate_name, FieldValidator,
    Rejection, MAX_GUESTS, MIN_GUESTS,
};
