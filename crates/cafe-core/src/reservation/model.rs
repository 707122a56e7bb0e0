//! Completed reservation models.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::field::{FieldKey, FieldValue, ReservationDraft};
use super::location::Location;

/// Reference code quoted in every booking confirmation.
pub const RESERVATION_REFERENCE: &str = "CONTOSO-4417";

/// A resolved reservation time: a date plus either a time point or a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationSlot {
    pub date: NaiveDate,
    pub start: NaiveTime,
    /// End of the window (exclusive). `None` for an exact time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveTime>,
}

impl ReservationSlot {
    pub fn at(date: NaiveDate, start: NaiveTime) -> Self {
        Self {
            date,
            start,
            end: None,
        }
    }

    pub fn window(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            date,
            start,
            end: Some(end),
        }
    }
}

impl fmt::Display for ReservationSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let day = self.date.format("%A, %B %-d");
        match self.end {
            None => write!(f, "{} at {}", day, self.start.format("%-I:%M %p")),
            Some(end) => write!(
                f,
                "{} between {} and {}",
                day,
                self.start.format("%-I:%M %p"),
                end.format("%-I:%M %p")
            ),
        }
    }
}

/// A confirmed reservation, kept in conversation state as the last booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub location: Location,
    pub slot: ReservationSlot,
    pub guests: u8,
    pub name: String,
    pub reference: String,
    pub booked_at: DateTime<Utc>,
}

impl Reservation {
    /// Builds a reservation from a draft whose four data fields hold validated
    /// values. Returns `None` if any of them is missing or not canonical.
    pub fn from_draft(draft: &ReservationDraft) -> Option<Self> {
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
            FieldValue::Text(name) => name.clone(),
            _ => return None,
        };

        Some(Self {
            location,
            slot,
            guests,
            name,
            reference: RESERVATION_REFERENCE.to_string(),
            booked_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_slot_display() {
        let exact = ReservationSlot::at(date(2026, 10, 20), time(19, 30));
        assert_eq!(exact.to_string(), "Tuesday, October 20 at 7:30 PM");

        let window = ReservationSlot::window(date(2026, 10, 20), time(16, 0), time(20, 0));
        assert_eq!(
            window.to_string(),
            "Tuesday, October 20 between 4:00 PM and 8:00 PM"
        );
    }

    #[test]
    fn test_from_draft_requires_all_fields() {
        let mut draft = ReservationDraft::default();
        draft.set(FieldKey::Location, FieldValue::Location(Location::Seattle));
        draft.set(
            FieldKey::DateTime,
            FieldValue::Slot(ReservationSlot::at(date(2026, 10, 20), time(19, 0))),
        );
        draft.set(FieldKey::NumberOfGuests, FieldValue::Count(4));
        assert!(Reservation::from_draft(&draft).is_none());

        draft.set(FieldKey::ReservationName, FieldValue::Text("Alex".into()));
        let reservation = Reservation::from_draft(&draft).unwrap();
        assert_eq!(reservation.location, Location::Seattle);
        assert_eq!(reservation.guests, 4);
        assert_eq!(reservation.reference, RESERVATION_REFERENCE);
    }

    #[test]
    fn test_from_draft_rejects_raw_text_values() {
        let mut draft = ReservationDraft::default();
        draft.set(FieldKey::Location, FieldValue::Text("seattle".into()));
        draft.set(
            FieldKey::DateTime,
            FieldValue::Slot(ReservationSlot::at(date(2026, 10, 20), time(19, 0))),
        );
        draft.set(FieldKey::NumberOfGuests, FieldValue::Count(4));
        draft.set(FieldKey::ReservationName, FieldValue::Text("Alex".into()));
        assert!(Reservation::from_draft(&draft).is_none());
    }
}
