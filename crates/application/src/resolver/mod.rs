//! Heap interpretation module
//!
//! Runs the steps produced by the heap parser against the injected ports.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use envres_application::{MemoryFileSystem, Resolver, StaticEnvironment};
//! use envres_application::ports::{CodeLoader, LoadError};
//! use envres_domain::Value;
//!
//! struct NoLoader;
//!
//! impl CodeLoader for NoLoader {
//!     fn load(&self, path: &std::path::Path) -> Result<Value, LoadError> {
//!         Err(LoadError::Unsupported(path.to_path_buf()))
//!     }
//! }
//!
//! let env = StaticEnvironment::new().with_variable("DB_PORT", "5432");
//! let resolver = Resolver::new(
//!     Arc::new(env),
//!     Arc::new(MemoryFileSystem::new()),
//!     Arc::new(NoLoader),
//! );
//!
//! assert_eq!(resolver.resolve("int:DB_PORT").unwrap(), Value::Int(5432));
//! assert_eq!(resolver.resolve("not:bool:direct:0").unwrap(), Value::Bool(true));
//! ```

pub mod codecs;
pub mod engine;
pub mod filters;
pub mod query;
pub mod url;

pub use engine::Resolver;
