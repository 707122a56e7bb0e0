//! Fixed-phrase command routing.

use serde::Serialize;

/// A command recognised from a normalized message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    Greeting,
    Help,
    Cancel,
    BookTable,
    Unknown,
}

/// Phrases that end any active dialog.
pub const CANCEL_PHRASES: [&str; 3] = ["cancel", "stop", "start over"];

const GREETING_PHRASES: [&str; 3] = ["who are you", "hi", "hello"];
const HELP_PHRASES: [&str; 1] = ["help"];
const BOOK_PHRASES: [&str; 1] = ["book a table"];

/// Trims and lower-cases a message, dropping trailing punctuation.
pub fn normalize(text: &str) -> String {
    text.trim()
        .trim_end_matches(['.', '!', '?'])
        .trim()
        .to_lowercase()
}

pub fn is_cancel_phrase(normalized: &str) -> bool {
    CANCEL_PHRASES.contains(&normalized)
}

/// Maps normalized text to a command by exact phrase match.
pub fn route(normalized: &str) -> Command {
    if is_cancel_phrase(normalized) {
        Command::Cancel
    } else if HELP_PHRASES.contains(&normalized) {
        Command::Help
    } else if GREETING_PHRASES.contains(&normalized) {
        Command::Greeting
    } else if BOOK_PHRASES.contains(&normalized) {
        Command::BookTable
    } else {
        Command::Unknown
    }
}

/// Every phrase the router understands, for completion in interactive shells.
pub fn known_phrases() -> Vec<&'static str> {
    HELP_PHRASES
        .iter()
        .chain(GREETING_PHRASES.iter())
        .chain(BOOK_PHRASES.iter())
        .chain(CANCEL_PHRASES.iter())
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Help  "), "help");
        assert_eq!(normalize("Who are you?"), "who are you");
        assert_eq!(normalize("BOOK A TABLE!"), "book a table");
    }

    #[test]
    fn test_route_fixed_phrases() {
        assert_eq!(route("help"), Command::Help);
        assert_eq!(route("who are you"), Command::Greeting);
        assert_eq!(route("book a table"), Command::BookTable);
        assert_eq!(route("cancel"), Command::Cancel);
        assert_eq!(route("start over"), Command::Cancel);
        assert_eq!(route("stop"), Command::Cancel);
    }

    #[test]
    fn test_route_is_exact_match() {
        assert_eq!(route("help me"), Command::Unknown);
        assert_eq!(route("book a table please"), Command::Unknown);
        assert_eq!(route(""), Command::Unknown);
    }

    #[test]
    fn test_known_phrases_cover_commands() {
        let phrases = known_phrases();
        assert!(phrases.contains(&"help"));
        assert!(phrases.contains(&"book a table"));
        assert!(phrases.contains(&"start over"));
    }
}
