//! Constant table port.

use envres_domain::Value;

/// Source of named constants for the `const` modifier.
pub trait ConstantTable: Send + Sync {
    /// Returns the constant's value, or `None` if it is not defined.
    fn lookup_constant(&self, name: &str) -> Option<Value>;
}
