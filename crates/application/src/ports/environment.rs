//! Environment lookup port.

/// Source of environment variables for the `env` modifier.
///
/// Implementations check their primary structured store first and fall back
/// to the process environment.
pub trait EnvironmentLookup: Send + Sync {
    /// Returns the value of the named variable, or `None` if it is undefined.
    fn lookup(&self, name: &str) -> Option<String>;
}
