//! Intent and entity recognition.
//!
//! Natural-language understanding is an external concern. The bot talks to it
//! through the [`Recognizer`] trait; [`KeywordRecognizer`] is a small local
//! implementation good enough for the console.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::error::Result;
use crate::reservation::{
    followed_by_time_suffix, DateTimeResolver, FieldKey, FieldValue, Location, ReservationDraft,
};
use crate::router::CANCEL_PHRASES;

/// Top-scoring intent of an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Intent {
    Book,
    Help,
    Cancel,
    Greeting,
    None,
}

/// Output of a recognizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Recognition {
    pub intent: Intent,
    /// Confidence in `[0, 1]`
    pub score: f32,
    /// Reservation fields found in the utterance, as raw text
    pub entities: ReservationDraft,
}

impl Recognition {
    pub fn none() -> Self {
        Self {
            intent: Intent::None,
            score: 0.0,
            entities: ReservationDraft::new(),
        }
    }
}

/// Extracts an intent and reservation entities from free text.
#[async_trait]
pub trait Recognizer: Send + Sync {
    async fn recognize(&self, text: &str) -> Result<Recognition>;
}

fn party_size_re() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| {
        Regex::new(r"\b(?:for (\d{1,3})\b|(\d{1,3}) (?:people|guests|persons|of us))")
            .expect("static pattern is valid")
    })
}

const BOOK_WORDS: [&str; 4] = ["book", "reserve", "reservation", "table"];
const GREETING_WORDS: [&str; 3] = ["hi", "hello", "hey"];

/// Word-based recognizer.
///
/// Booking words select [`Intent::Book`]; a cafe name, a party size
/// ("for 4", "4 people") and a date/time fragment become entities.
#[derive(Debug, Clone, Default)]
pub struct KeywordRecognizer {
    resolver: DateTimeResolver,
}

impl KeywordRecognizer {
    pub fn new(resolver: DateTimeResolver) -> Self {
        Self { resolver }
    }

    fn entities(&self, lower: &str, words: &[&str]) -> ReservationDraft {
        let mut draft = ReservationDraft::new();

        if let Some(location) = Location::iter()
            .find(|location| words.contains(&location.to_string().to_lowercase().as_str()))
        {
            draft.set(FieldKey::Location, FieldValue::Location(location));
        }

        // "for 7 pm" names a time, not a party of seven.
        let party_size = party_size_re()
            .captures_iter(lower)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
            .find(|size| !followed_by_time_suffix(lower, size.end()));
        if let Some(size) = party_size {
            draft.set(FieldKey::NumberOfGuests, FieldValue::text(size.as_str()));
        }

        if let Some(fragment) = self.resolver.extract(lower) {
            draft.set(FieldKey::DateTime, FieldValue::text(fragment));
        }

        draft
    }
}

#[async_trait]
impl Recognizer for KeywordRecognizer {
    async fn recognize(&self, text: &str) -> Result<Recognition> {
        let lower = text.trim().to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .collect();
        let has_any = |candidates: &[&str]| words.iter().any(|word| candidates.contains(word));

        let recognition = if has_any(&BOOK_WORDS) {
            let entities = self.entities(&lower, &words);
            Recognition {
                intent: Intent::Book,
                score: 0.6 + 0.1 * entities.len() as f32,
                entities,
            }
        } else if CANCEL_PHRASES.iter().any(|phrase| lower.contains(phrase)) {
            Recognition {
                intent: Intent::Cancel,
                score: 0.6,
                entities: ReservationDraft::new(),
            }
        } else if words.contains(&"help") {
            Recognition {
                intent: Intent::Help,
                score: 0.6,
                entities: ReservationDraft::new(),
            }
        } else if words.first().is_some_and(|word| GREETING_WORDS.contains(word)) {
            Recognition {
                intent: Intent::Greeting,
                score: 0.5,
                entities: ReservationDraft::new(),
            }
        } else {
            Recognition::none()
        };

        Ok(recognition)
    }
}
