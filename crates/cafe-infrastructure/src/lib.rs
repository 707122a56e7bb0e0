pub mod config_service;
pub mod file_state_store;
pub mod memory_state_store;
pub mod paths;
pub mod state_store_factory;

pub use crate::config_service::ConfigService;
pub use crate::file_state_store::FileStateStore;
pub use crate::memory_state_store::MemoryStateStore;
pub use crate::paths::CafePaths;
pub use crate::state_store_factory::create_state_store;
