use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// A cafe location that accepts reservations.
///
/// Parsing is case-insensitive; display always uses the canonical casing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Location {
    Seattle,
    Bellevue,
    Renton,
    Redmond,
}

impl Location {
    /// Human-readable list, e.g. "Seattle, Bellevue, Renton, or Redmond".
    pub fn choices() -> String {
        let names: Vec<String> = Location::iter().map(|l| l.to_string()).collect();
        match names.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{}, or {}", rest.join(", "), last),
            Some((last, _)) => last.clone(),
            None => String::new(),
        }
    }
}
