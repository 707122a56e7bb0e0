use serde::{Deserialize, Serialize};

use crate::reservation::FieldKey;

/// A state of the reservation dialog. Each step collects one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DialogStep {
    CollectLocation,
    CollectDateTime,
    CollectGuests,
    CollectName,
    Confirm,
}

impl DialogStep {
    pub const FIRST: DialogStep = DialogStep::CollectLocation;

    /// The field this step collects.
    pub fn field(&self) -> FieldKey {
        match self {
            DialogStep::CollectLocation => FieldKey::Location,
            DialogStep::CollectDateTime => FieldKey::DateTime,
            DialogStep::CollectGuests => FieldKey::NumberOfGuests,
            DialogStep::CollectName => FieldKey::ReservationName,
            DialogStep::Confirm => FieldKey::Confirmation,
        }
    }

    /// The following step; `None` after confirmation.
    pub fn next(&self) -> Option<DialogStep> {
        match self {
            DialogStep::CollectLocation => Some(DialogStep::CollectDateTime),
            DialogStep::CollectDateTime => Some(DialogStep::CollectGuests),
            DialogStep::CollectGuests => Some(DialogStep::CollectName),
            DialogStep::CollectName => Some(DialogStep::Confirm),
            DialogStep::Confirm => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_visit_every_field_once() {
        let mut fields = vec![DialogStep::FIRST.field()];
        let mut step = DialogStep::FIRST;
        while let Some(next) = step.next() {
            fields.push(next.field());
            step = next;
        }
        assert_eq!(
            fields,
            [
                FieldKey::Location,
                FieldKey::DateTime,
                FieldKey::NumberOfGuests,
                FieldKey::ReservationName,
                FieldKey::Confirmation
            ]
        );
    }
}
