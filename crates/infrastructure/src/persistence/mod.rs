//! Persistence adapters
//!
//! File system access and settings loading.

mod file_system;
mod settings_repository;

pub use file_system::LocalFileSystem;
pub use settings_repository::{MAX_NESTING_DEPTH_VAR, SettingsError, SettingsRepository};
