//! Reservation fields and the in-progress draft.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

use super::location::Location;
use super::model::ReservationSlot;

/// Key of a reservation field, in collection order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FieldKey {
    Location,
    DateTime,
    NumberOfGuests,
    ReservationName,
    Confirmation,
}

impl FieldKey {
    /// The draft map key, e.g. `numberOfGuests`.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// A value held in the draft.
///
/// `Text` is what arrives from the user or an entity extractor. Validators
/// turn it into the canonical variant for the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum FieldValue {
    Text(String),
    Location(Location),
    Slot(ReservationSlot),
    Count(u8),
    Flag(bool),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

/// The set of fields collected so far by one dialog instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservationDraft {
    fields: BTreeMap<String, FieldValue>,
}

impl ReservationDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: FieldKey) -> Option<&FieldValue> {
        self.fields.get(key.as_str())
    }

    pub fn set(&mut self, key: FieldKey, value: FieldValue) {
        self.fields.insert(key.as_str().to_string(), value);
    }

    pub fn remove(&mut self, key: FieldKey) -> Option<FieldValue> {
        self.fields.remove(key.as_str())
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.fields.contains_key(key.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

/// Expected value type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// One of a fixed set of names
    Choice,
    /// Natural-language date/time expression
    DateExpression,
    /// Integer within inclusive bounds
    BoundedInteger { min: u8, max: u8 },
    FreeText,
    Boolean,
}

/// Static description of one reservation field.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub key: FieldKey,
    /// Prompt shown when the field is first requested
    pub prompt: String,
    pub kind: ValueKind,
}

static FIELD_DEFINITIONS: OnceLock<Vec<FieldDefinition>> = OnceLock::new();

/// Returns the five reservation fields in collection order.
pub fn field_definitions() -> &'static [FieldDefinition] {
    FIELD_DEFINITIONS.get_or_init(|| {
        vec![
            FieldDefinition {
                key: FieldKey::Location,
                prompt: format!(
                    "Which of our locations would you like? ({})",
                    Location::choices()
                ),
                kind: ValueKind::Choice,
            },
            FieldDefinition {
                key: FieldKey::DateTime,
                prompt: "When would you like to come in? We take evening reservations \
                         (4pm to 8pm) up to two weeks ahead."
                    .to_string(),
                kind: ValueKind::DateExpression,
            },
            FieldDefinition {
                key: FieldKey::NumberOfGuests,
                prompt: "How many people are in your party?".to_string(),
                kind: ValueKind::BoundedInteger {
                    min: super::validator::MIN_GUESTS,
                    max: super::validator::MAX_GUESTS,
                },
            },
            FieldDefinition {
                key: FieldKey::ReservationName,
                prompt: "What name should I put the reservation under?".to_string(),
                kind: ValueKind::FreeText,
            },
            FieldDefinition {
                key: FieldKey::Confirmation,
                prompt: "Shall I go ahead and book it? (yes/no)".to_string(),
                kind: ValueKind::Boolean,
            },
        ]
    })
}

/// Finds the definition for a field.
pub fn field_definition(key: FieldKey) -> &'static FieldDefinition {
    let definitions = field_definitions();
    definitions
        .iter()
        .find(|definition| definition.key == key)
        .unwrap_or(&definitions[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_field_keys_use_camel_case() {
        let keys: Vec<&str> = FieldKey::iter().map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            [
                "location",
                "dateTime",
                "numberOfGuests",
                "reservationName",
                "confirmation"
            ]
        );
    }

    #[test]
    fn test_definitions_follow_key_order() {
        let keys: Vec<FieldKey> = field_definitions().iter().map(|d| d.key).collect();
        let expected: Vec<FieldKey> = FieldKey::iter().collect();
        assert_eq!(keys, expected);
        assert_eq!(
            field_definition(FieldKey::NumberOfGuests).kind,
            ValueKind::BoundedInteger { min: 1, max: 12 }
        );
    }

    #[test]
    fn test_draft_serializes_with_field_keys() {
        let mut draft = ReservationDraft::new();
        draft.set(FieldKey::NumberOfGuests, FieldValue::Count(4));
        draft.set(FieldKey::Location, FieldValue::Location(Location::Renton));

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["fields"]["numberOfGuests"]["value"], 4);
        assert_eq!(json["fields"]["location"]["value"], "Renton");

        let restored: ReservationDraft = serde_json::from_value(json).unwrap();
        assert_eq!(restored, draft);
    }

    #[test]
    fn test_draft_remove() {
        let mut draft = ReservationDraft::new();
        draft.set(FieldKey::ReservationName, FieldValue::text("Alex"));
        assert!(draft.contains(FieldKey::ReservationName));
        assert_eq!(
            draft.remove(FieldKey::ReservationName),
            Some(FieldValue::text("Alex"))
        );
        assert!(draft.is_empty());
    }
}
