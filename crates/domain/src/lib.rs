//! Env Resolver Domain - Core types
//!
//! This crate defines the model shared by the heap parser, the step
//! interpreter and the placeholder substitution pass.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod modifier;
pub mod settings;
pub mod step;
pub mod value;

pub use error::{ErrorKind, ReferenceKind, ResolveError, ResolveResult};
pub use modifier::{Arity, Modifier};
pub use settings::ResolverSettings;
pub use step::Step;
pub use value::{EnumBacking, EnumCase, Mapping, Value};
