//! Resolver settings
//!
//! Tunables for the substitution pass and the seed of the primary variable
//! store.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default limit of nested substitution passes.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 100;

/// Settings for composing a resolver and a string processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverSettings {
    /// Maximum number of innermost-first rewriting passes.
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,

    /// Variables consulted before the process environment.
    #[serde(default)]
    pub variables: IndexMap<String, String>,
}

const fn default_max_nesting_depth() -> usize {
    DEFAULT_MAX_NESTING_DEPTH
}

impl ResolverSettings {
    /// Returns settings with the given nesting limit.
    #[must_use]
    pub const fn with_max_nesting_depth(mut self, max_nesting_depth: usize) -> Self {
        self.max_nesting_depth = max_nesting_depth;
        self
    }

    /// Adds a variable to the primary store.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            max_nesting_depth: default_max_nesting_depth(),
            variables: IndexMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_settings() {
        let settings = ResolverSettings::default();
        assert_eq!(settings.max_nesting_depth, 100);
        assert!(settings.variables.is_empty());
    }

    #[test]
    fn missing_fields_use_defaults() {
        let settings: ResolverSettings =
            serde_json::from_str(r#"{"variables":{"A":"1"}}"#).unwrap_or_default();
        assert_eq!(settings.max_nesting_depth, 100);
        assert_eq!(settings.variables.get("A").map(String::as_str), Some("1"));
    }

    #[test]
    fn builder_methods() {
        let settings = ResolverSettings::default()
            .with_max_nesting_depth(3)
            .with_variable("HOST", "localhost");
        assert_eq!(settings.max_nesting_depth, 3);
        assert_eq!(settings.variables["HOST"], "localhost");
    }
}
