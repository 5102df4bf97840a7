//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the interpreter and the outside world.
//! Each port is a trait implemented by adapters in the infrastructure layer,
//! or by the in-memory tables in [`crate::memory`].

mod code_loader;
mod constants;
mod enum_registry;
mod environment;
mod file_system;
mod resolver;

pub use code_loader::{CodeLoader, LoadError};
pub use constants::ConstantTable;
pub use enum_registry::EnumRegistry;
pub use environment::EnvironmentLookup;
pub use file_system::{FileSystem, FileSystemError};
pub use resolver::{HeapResolver, StepSource};
