//! Backed enum registry port.

use envres_domain::{EnumCase, Value};

/// Registry of backed enums for the `enum` modifier.
pub trait EnumRegistry: Send + Sync {
    /// Returns true if `enum_type` names a registered backed enum.
    fn is_backed_enum(&self, enum_type: &str) -> bool;

    /// Returns the case of `enum_type` whose backing value equals `value`.
    ///
    /// Returns `None` when the type is unknown or no case matches.
    fn try_from_value(&self, enum_type: &str, value: &Value) -> Option<EnumCase>;
}
