//! Fixed reply templates.

use crate::reservation::{
    FieldKey, Location, Rejection, Reservation, ReservationSlot, MAX_GUESTS, MIN_GUESTS,
};

pub const WELCOME: &str =
    "Hello and welcome to Contoso Cafe! I can help you reserve a table. Type 'help' to see what I can do.";

pub const WHO_ARE_YOU: &str =
    "Hi! I'm the Contoso Cafe bot. I can book you a table at one of our cafes.";

pub const HELP: &str = "Here's what I can do:\n\
    - book a table: reserve a table at one of our cafes\n\
    - who are you: learn about me\n\
    - cancel: stop what we're doing\n\
    - help: show this message";

pub const DONT_UNDERSTAND: &str = "I'm sorry, I didn't understand that.";

pub const CANCELLED: &str = "Ok. I've cancelled our last activity.";

pub const NOTHING_TO_CANCEL: &str = "There's nothing to cancel right now.";

pub const BOOKING_DECLINED: &str =
    "Ok, I won't book that table. Let me know if there's anything else I can do.";

pub const ECHO_WELCOME: &str = "Hello and welcome!";

pub fn echo(turn: u64, text: &str) -> String {
    format!("Turn {}: You sent '{}'", turn, text)
}

pub fn booking_confirmed(reservation: &Reservation) -> String {
    format!(
        "Great! Your table for {} at our {} cafe is booked for {}, under the name {}. \
         Your reference number is {}.",
        reservation.guests,
        reservation.location,
        reservation.slot,
        reservation.name,
        reservation.reference
    )
}

pub fn reservation_summary(
    location: Location,
    slot: &ReservationSlot,
    guests: u8,
    name: &str,
) -> String {
    let party = if guests == 1 {
        "1 guest".to_string()
    } else {
        format!("{} guests", guests)
    };
    format!(
        "Ok. I have a table for {} at our {} cafe on {}, under the name {}.",
        party, location, slot, name
    )
}

/// Retry prompt for a rejected field value.
pub fn retry_prompt(key: FieldKey, rejection: Rejection) -> String {
    match (key, rejection) {
        (FieldKey::Location, _) => format!(
            "Sorry, we don't have a cafe there. Please choose {}.",
            Location::choices()
        ),
        (FieldKey::DateTime, Rejection::Unparseable) => {
            "Sorry, I didn't catch the date. Try something like 'tomorrow at 7pm' or \
             'Friday evening'."
                .to_string()
        }
        (FieldKey::DateTime, _) => {
            "Sorry, we only take evening reservations (4pm to 8pm) within the next two weeks. \
             When would you like to come in?"
                .to_string()
        }
        (FieldKey::NumberOfGuests, Rejection::TooSmall) => format!(
            "A reservation needs at least {} guest. How many people are in your party?",
            MIN_GUESTS
        ),
        (FieldKey::NumberOfGuests, Rejection::TooBig) => format!(
            "Sorry, we can seat at most {} guests. How many people are in your party?",
            MAX_GUESTS
        ),
        (FieldKey::NumberOfGuests, _) => format!(
            "Please tell me the number of guests as a number from {} to {}.",
            MIN_GUESTS, MAX_GUESTS
        ),
        (FieldKey::ReservationName, _) => {
            "Please tell me a name for the reservation.".to_string()
        }
        (FieldKey::Confirmation, _) => "Please answer yes or no.".to_string(),
    }
}
