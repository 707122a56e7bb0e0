//! Configuration loading.
//!
//! Reads [`BotConfig`] from `config.toml`. A missing or empty file is not an
//! error: the defaults apply.

use std::path::{Path, PathBuf};

use cafe_core::config::BotConfig;
use cafe_core::error::{CafeError, Result};
use tracing::debug;

use crate::paths::CafePaths;

/// Loads the bot configuration from a file.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses the default location, `<config_dir>/contoso-cafe/config.toml`.
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: CafePaths::config_file()?,
        })
    }

    /// Uses an explicit file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<BotConfig> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(BotConfig::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            CafeError::io(format!(
                "Failed to read config file at {}: {}",
                self.path.display(),
                e
            ))
        })?;

        if content.trim().is_empty() {
            return Ok(BotConfig::default());
        }

        toml::from_str(&content).map_err(|e| {
            CafeError::config(format!(
                "Failed to parse config file at {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}
