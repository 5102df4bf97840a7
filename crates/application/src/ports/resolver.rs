//! Resolution ports.

use envres_domain::{ResolveResult, Step, Value};

/// Builds the step pipeline for a heap.
pub trait StepSource: Send + Sync {
    /// Parses `heap` into steps in execution order.
    ///
    /// # Errors
    ///
    /// Returns [`envres_domain::ResolveError::InvalidHeap`] for grammar violations.
    fn steps(&self, heap: &str) -> ResolveResult<Vec<Step>>;
}

/// Resolves a single heap to a value. Used by the substitution pass.
pub trait HeapResolver: Send + Sync {
    /// Resolves `heap`.
    ///
    /// # Errors
    ///
    /// Returns the first parse or interpretation failure.
    fn resolve(&self, heap: &str) -> ResolveResult<Value>;
}
