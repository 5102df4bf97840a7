//! Process environment adapter.

use envres_application::ports::EnvironmentLookup;
use indexmap::IndexMap;

/// Environment lookup over a primary variable map, falling back to the
/// process environment.
#[derive(Debug, Clone, Default)]
pub struct ProcessEnvironment {
    variables: IndexMap<String, String>,
}

impl ProcessEnvironment {
    /// Creates an environment backed only by the process environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an environment whose primary store holds `variables`.
    #[must_use]
    pub const fn with_variables(variables: IndexMap<String, String>) -> Self {
        Self { variables }
    }

    /// Sets a variable in the primary store. The process environment is not
    /// touched.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }
}

impl EnvironmentLookup for ProcessEnvironment {
    fn lookup(&self, name: &str) -> Option<String> {
        if let Some(value) = self.variables.get(name) {
            return Some(value.clone());
        }
        // not representable as a process variable name
        if name.is_empty() || name.contains(['=', '\0']) {
            return None;
        }
        std::env::var(name).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_primary_store_wins() {
        let mut environment = ProcessEnvironment::new();
        environment.set("CARGO_PKG_NAME", "shadowed");
        assert_eq!(
            environment.lookup("CARGO_PKG_NAME"),
            Some("shadowed".to_string())
        );
    }

    #[test]
    fn test_falls_back_to_process_environment() {
        let environment = ProcessEnvironment::new();
        assert_eq!(
            environment.lookup("CARGO_MANIFEST_DIR"),
            Some(env!("CARGO_MANIFEST_DIR").to_string())
        );
    }

    #[test]
    fn test_unrepresentable_names() {
        let environment = ProcessEnvironment::new();
        assert_eq!(environment.lookup(""), None);
        assert_eq!(environment.lookup("A=B"), None);
        assert_eq!(environment.lookup("ENVRES_SURELY_UNDEFINED_VARIABLE"), None);
    }
}
