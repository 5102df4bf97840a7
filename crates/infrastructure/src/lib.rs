//! Env Resolver Infrastructure - Adapters and composition
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, and wires them into a ready-to-use
//! [`Resolver`] and [`StringProcessor`].

pub mod adapters;
pub mod persistence;
pub mod serialization;

use std::sync::Arc;

use envres_application::{Constants, Resolver, StringProcessor};
use envres_domain::ResolverSettings;

pub use adapters::{DocumentLoader, ProcessEnvironment};
pub use persistence::{LocalFileSystem, MAX_NESTING_DEPTH_VAR, SettingsError, SettingsRepository};
pub use serialization::{DocumentFormat, SerializationError};

/// Builds a resolver over the process environment (seeded with
/// `settings.variables`), the local file system, the document loader and the
/// platform constants.
#[must_use]
pub fn default_resolver(settings: &ResolverSettings) -> Resolver {
    Resolver::new(
        Arc::new(ProcessEnvironment::with_variables(settings.variables.clone())),
        Arc::new(LocalFileSystem::new()),
        Arc::new(DocumentLoader::new()),
    )
    .with_constants(Arc::new(Constants::system()))
}

/// Builds a string processor on top of [`default_resolver`] with the
/// configured nesting limit.
///
/// # Examples
///
/// ```
/// use envres_domain::ResolverSettings;
/// use envres_infrastructure::default_processor;
///
/// let settings = ResolverSettings::default().with_variable("GREETING", "hello");
/// let processor = default_processor(&settings);
/// assert_eq!(processor.process("%env(GREETING)% 50%%").unwrap(), "hello 50%");
/// ```
#[must_use]
pub fn default_processor(settings: &ResolverSettings) -> StringProcessor {
    StringProcessor::new(default_resolver(settings))
        .with_max_nesting_depth(settings.max_nesting_depth)
}
