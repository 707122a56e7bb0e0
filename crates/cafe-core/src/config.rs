//! Configuration model.
//!
//! Loaded from `config.toml` by the infrastructure layer. Every key is
//! optional; a missing file yields [`BotConfig::default`].

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which bot answers the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BotKind {
    #[default]
    Cafe,
    Echo,
}

/// Where conversation state is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StateBackend {
    #[default]
    Memory,
    File,
}

/// Which recognizer handles messages the fixed-phrase router does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RecognizerKind {
    #[default]
    None,
    Keyword,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateConfig {
    #[serde(default)]
    pub backend: StateBackend,
    /// Directory for the file backend. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

fn default_user_name() -> String {
    "User".to_string()
}

fn default_conversation_id() -> String {
    "console".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default)]
    pub bot: BotKind,
    #[serde(default)]
    pub recognizer: RecognizerKind,
    /// Display name of the console user
    #[serde(default = "default_user_name")]
    pub user_name: String,
    /// State key of the console conversation
    #[serde(default = "default_conversation_id")]
    pub conversation_id: String,
    #[serde(default)]
    pub state: StateConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            bot: BotKind::default(),
            recognizer: RecognizerKind::default(),
            user_name: default_user_name(),
            conversation_id: default_conversation_id(),
            state: StateConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_empty_toml_is_default() {
        let config: BotConfig = toml::from_str("").unwrap();
        assert_eq!(config, BotConfig::default());
        assert_eq!(config.conversation_id, "console");
    }

    #[test]
    fn test_full_toml() {
        let config: BotConfig = toml::from_str(
            r#"
bot = "echo"
recognizer = "keyword"
user_name = "Alex"

[state]
backend = "file"
dir = "/tmp/cafe-state"
"#,
        )
        .unwrap();
        assert_eq!(config.bot, BotKind::Echo);
        assert_eq!(config.recognizer, RecognizerKind::Keyword);
        assert_eq!(config.user_name, "Alex");
        assert_eq!(config.state.backend, StateBackend::File);
        assert_eq!(config.state.dir, Some(PathBuf::from("/tmp/cafe-state")));
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let result = toml::from_str::<BotConfig>("[state]\nbackend = \"redis\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_kinds_parse_from_cli_strings() {
        assert_eq!(BotKind::from_str("Echo").unwrap(), BotKind::Echo);
        assert_eq!(RecognizerKind::from_str("keyword").unwrap(), RecognizerKind::Keyword);
        assert_eq!(StateBackend::File.to_string(), "file");
    }
}
