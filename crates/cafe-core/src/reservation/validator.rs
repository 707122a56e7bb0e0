//! Field validation policies.
//!
//! Validators never fail fatally. A rejected value yields a [`Rejection`] that
//! the dialog turns into a field-specific retry prompt.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use super::datetime::DateTimeResolver;
use super::field::{FieldKey, FieldValue};
use super::location::Location;

pub const MIN_GUESTS: u8 = 1;
pub const MAX_GUESTS: u8 = 12;

/// Why a candidate value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Not one of the accepted values (unknown location, not a number, not yes/no)
    NotRecognized,
    /// Below the lower bound
    TooSmall,
    /// Above the upper bound
    TooBig,
    /// Blank after trimming
    Empty,
    /// No date/time could be read from the phrase
    Unparseable,
    /// Readable, but no reading is an evening slot within the booking window
    OutsideWindow,
}

const NUMBER_WORDS: [&str; 21] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty",
];

fn number_re() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| Regex::new(r"-?\d+").expect("static pattern is valid"))
}

/// Reads the first integer in the text, as digits or a number word.
fn parse_count(text: &str) -> Option<i64> {
    let lower = text.trim().to_lowercase();
    if let Some(m) = number_re().find(&lower) {
        // Saturate overly long digit runs instead of failing to parse them.
        return Some(m.as_str().parse::<i64>().unwrap_or_else(|_| {
            if m.as_str().starts_with('-') { i64::MIN } else { i64::MAX }
        }));
    }
    lower
        .split(|c: char| !c.is_alphabetic())
        .find_map(|word| NUMBER_WORDS.iter().position(|w| *w == word))
        .and_then(|n| i64::try_from(n).ok())
}

/// Location must match one of the cafe names, ignoring case.
pub fn validate_location(text: &str) -> Result<Location, Rejection> {
    Location::from_str(text.trim()).map_err(|_| Rejection::NotRecognized)
}

/// Party size must be an integer in `[MIN_GUESTS, MAX_GUESTS]`.
pub fn validate_guests(text: &str) -> Result<u8, Rejection> {
    let count = parse_count(text).ok_or(Rejection::NotRecognized)?;
    if count < i64::from(MIN_GUESTS) {
        Err(Rejection::TooSmall)
    } else if count > i64::from(MAX_GUESTS) {
        Err(Rejection::TooBig)
    } else {
        u8::try_from(count).map_err(|_| Rejection::TooBig)
    }
}

pub fn validate_name(text: &str) -> Result<String, Rejection> {
    let name = text.trim();
    if name.is_empty() {
        Err(Rejection::Empty)
    } else {
        Ok(name.to_string())
    }
}

pub fn validate_confirmation(text: &str) -> Result<bool, Rejection> {
    let answer = text
        .trim()
        .trim_end_matches(['.', '!'])
        .to_lowercase();
    match answer.as_str() {
        "yes" | "y" | "yeah" | "yep" | "sure" | "ok" | "okay" | "confirm" | "please do" => {
            Ok(true)
        }
        "no" | "n" | "nope" | "nah" | "no thanks" => Ok(false),
        _ => Err(Rejection::NotRecognized),
    }
}

/// Validates any field value and returns its canonical form.
///
/// Raw `Text` is parsed by the field's policy. Values already in canonical
/// form are re-checked against the same policy, so a stale pre-seeded slot
/// or an out-of-range count is still rejected.
#[derive(Debug, Clone, Default)]
pub struct FieldValidator {
    resolver: DateTimeResolver,
}

impl FieldValidator {
    pub fn new(resolver: DateTimeResolver) -> Self {
        Self { resolver }
    }

    pub fn validate(&self, key: FieldKey, value: &FieldValue) -> Result<FieldValue, Rejection> {
        match (key, value) {
            (FieldKey::Location, FieldValue::Location(location)) => {
                Ok(FieldValue::Location(*location))
            }
            (FieldKey::Location, FieldValue::Text(text)) => {
                validate_location(text).map(FieldValue::Location)
            }

            (FieldKey::DateTime, FieldValue::Slot(slot)) => {
                if self.resolver.accepts(slot) {
                    Ok(FieldValue::Slot(*slot))
                } else {
                    Err(Rejection::OutsideWindow)
                }
            }
            (FieldKey::DateTime, FieldValue::Text(text)) => {
                self.resolver.resolve(text).map(FieldValue::Slot)
            }

            (FieldKey::NumberOfGuests, FieldValue::Count(count)) => {
                validate_guests(&count.to_string()).map(FieldValue::Count)
            }
            (FieldKey::NumberOfGuests, FieldValue::Text(text)) => {
                validate_guests(text).map(FieldValue::Count)
            }

            (FieldKey::ReservationName, FieldValue::Text(text)) => {
                validate_name(text).map(FieldValue::Text)
            }

            (FieldKey::Confirmation, FieldValue::Flag(flag)) => Ok(FieldValue::Flag(*flag)),
            (FieldKey::Confirmation, FieldValue::Text(text)) => {
                validate_confirmation(text).map(FieldValue::Flag)
            }

            _ => Err(Rejection::NotRecognized),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_location_records_canonical_casing() {
        assert_eq!(validate_location("  sEaTtLe "), Ok(Location::Seattle));
        assert_eq!(validate_location("Portland"), Err(Rejection::NotRecognized));
    }

    #[test]
    fn test_guest_bounds() {
        assert_eq!(validate_guests("1"), Ok(1));
        assert_eq!(validate_guests("12"), Ok(12));
        assert_eq!(validate_guests("0"), Err(Rejection::TooSmall));
        assert_eq!(validate_guests("-3"), Err(Rejection::TooSmall));
        assert_eq!(validate_guests("13"), Err(Rejection::TooBig));
        assert_eq!(
            validate_guests("99999999999999999999999"),
            Err(Rejection::TooBig)
        );
    }

    #[test]
    fn test_guest_text_forms() {
        assert_eq!(validate_guests("4 people"), Ok(4));
        assert_eq!(validate_guests("Four"), Ok(4));
        assert_eq!(validate_guests("we are six"), Ok(6));
        assert_eq!(validate_guests("lots"), Err(Rejection::NotRecognized));
    }

    #[test]
    fn test_name_must_not_be_blank() {
        assert_eq!(validate_name("  Alex "), Ok("Alex".to_string()));
        assert_eq!(validate_name("   "), Err(Rejection::Empty));
    }

    #[test]
    fn test_confirmation_answers() {
        assert_eq!(validate_confirmation("Yes"), Ok(true));
        assert_eq!(validate_confirmation("ok!"), Ok(true));
        assert_eq!(validate_confirmation("no"), Ok(false));
        assert_eq!(validate_confirmation("maybe"), Err(Rejection::NotRecognized));
    }

    #[test]
    fn test_field_validator_canonicalizes_text() {
        let validator = FieldValidator::new(DateTimeResolver::with_today(
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        ));
        assert_eq!(
            validator.validate(FieldKey::Location, &FieldValue::text("renton")),
            Ok(FieldValue::Location(Location::Renton))
        );
        assert_eq!(
            validator.validate(FieldKey::NumberOfGuests, &FieldValue::Count(20)),
            Err(Rejection::TooBig)
        );
        assert!(matches!(
            validator.validate(FieldKey::DateTime, &FieldValue::text("tomorrow evening")),
            Ok(FieldValue::Slot(_))
        ));
    }

    #[test]
    fn test_field_validator_rejects_mismatched_kind() {
        let validator = FieldValidator::default();
        assert_eq!(
            validator.validate(FieldKey::Location, &FieldValue::Count(3)),
            Err(Rejection::NotRecognized)
        );
    }
}
