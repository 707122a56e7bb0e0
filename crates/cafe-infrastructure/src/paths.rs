//! Unified path management for Contoso Cafe configuration and state files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/contoso-cafe/        # Config directory
//! └── config.toml                # Bot configuration
//!
//! ~/.local/share/contoso-cafe/   # Data directory
//! └── state/                     # One JSON file per conversation
//! ```

use std::path::PathBuf;

use cafe_core::error::CafeError;

const APP_DIR: &str = "contoso-cafe";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
    /// Data directory could not be determined.
    DataDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
            PathError::DataDirNotFound => write!(f, "Cannot find data directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for CafeError {
    fn from(err: PathError) -> Self {
        CafeError::config(err.to_string())
    }
}

/// Resolves platform directories via `dirs`.
pub struct CafePaths;

impl CafePaths {
    /// Returns the config directory (e.g., `~/.config/contoso-cafe/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the data directory (e.g., `~/.local/share/contoso-cafe/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::DataDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the default directory of the file state store.
    pub fn state_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("state"))
    }
}
