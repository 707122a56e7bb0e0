//! Builds the configured state store.

use std::sync::Arc;

use cafe_core::config::{StateBackend, StateConfig};
use cafe_core::error::Result;
use cafe_core::state::StateStore;
use tracing::info;

use crate::file_state_store::FileStateStore;
use crate::memory_state_store::MemoryStateStore;
use crate::paths::CafePaths;

/// Creates the store selected by `config.backend`.
///
/// The file backend uses `config.dir`, or the platform data directory when
/// none is set.
pub fn create_state_store(config: &StateConfig) -> Result<Arc<dyn StateStore>> {
    match config.backend {
        StateBackend::Memory => {
            info!("using in-memory conversation state");
            Ok(Arc::new(MemoryStateStore::new()))
        }
        StateBackend::File => {
            let dir = match &config.dir {
                Some(dir) => dir.clone(),
                None => CafePaths::state_dir()?,
            };
            info!(dir = %dir.display(), "using file conversation state");
            Ok(Arc::new(FileStateStore::new(dir)))
        }
    }
}
