//! Env Resolver Application - Parser, interpreter and substitution
//!
//! This crate defines:
//! - Port traits for the environment, filesystem, code loader, constants and
//!   enum registry the interpreter depends on
//! - The heap parser turning `json:base64:direct:...` into steps
//! - The step interpreter ([`Resolver`])
//! - The `%env(...)%` substitution pass ([`StringProcessor`])

pub mod heap;
pub mod memory;
pub mod ports;
pub mod resolver;
pub mod substitution;

pub use heap::{HeapParser, parse_heap};
pub use memory::{BackedEnum, Constants, EnumTypes, MemoryFileSystem, StaticEnvironment};
pub use ports::{
    CodeLoader, ConstantTable, EnumRegistry, EnvironmentLookup, FileSystem, FileSystemError,
    HeapResolver, LoadError, StepSource,
};
pub use resolver::Resolver;
pub use substitution::{Placeholder, StringProcessor, find_innermost};
