//! Placeholder substitution
//!
//! Rewrites every innermost `%env(...)%` of a string with its resolved value,
//! then rescans until none is left.

use envres_domain::settings::DEFAULT_MAX_NESTING_DEPTH;
use envres_domain::{ResolveError, ResolveResult, Value};
use tracing::{debug, warn};

use super::scanner::find_innermost;
use crate::Resolver;
use crate::ports::HeapResolver;

/// Stands in for `%%` while placeholders are being rewritten.
const ESCAPE_MARKER: &str = "\u{0}__ESCAPED_PERCENT__\u{0}";

/// Substitutes `%env(<heap>)%` placeholders through a [`HeapResolver`].
#[derive(Debug, Clone)]
pub struct StringProcessor<R = Resolver> {
    resolver: R,
    max_nesting_depth: usize,
}

impl<R: HeapResolver> StringProcessor<R> {
    /// Creates a processor with the default nesting limit.
    #[must_use]
    pub const fn new(resolver: R) -> Self {
        Self {
            resolver,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }

    /// Sets how many rewriting passes a string may need.
    #[must_use]
    pub fn with_max_nesting_depth(mut self, max_nesting_depth: usize) -> Self {
        self.max_nesting_depth = max_nesting_depth;
        self
    }

    /// Returns the resolver.
    #[must_use]
    pub const fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Substitutes all placeholders. Strings are inserted as is, bytes as
    /// lossy UTF-8 and everything else as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns the first resolution error unchanged, or
    /// [`ResolveError::NestingDepthExceeded`] when placeholders remain after
    /// the configured number of passes.
    ///
    /// # Examples
    ///
    /// ```
    /// use envres_application::{StringProcessor, HeapResolver};
    /// use envres_domain::{ResolveResult, Value};
    ///
    /// struct Echo;
    ///
    /// impl HeapResolver for Echo {
    ///     fn resolve(&self, heap: &str) -> ResolveResult<Value> {
    ///         Ok(Value::from(heap.to_uppercase()))
    ///     }
    /// }
    ///
    /// let processor = StringProcessor::new(Echo);
    /// assert_eq!(processor.process("x=%env(a)% 100%%").unwrap(), "x=A 100%");
    /// ```
    pub fn process(&self, text: &str) -> ResolveResult<String> {
        self.process_with(text, stringify)
    }

    /// Substitutes all placeholders, rendering each resolved value with
    /// `render`.
    ///
    /// # Errors
    ///
    /// Same as [`StringProcessor::process`].
    pub fn process_with<F>(&self, text: &str, mut render: F) -> ResolveResult<String>
    where
        F: FnMut(&Value) -> String,
    {
        let mut output = text.replace("%%", ESCAPE_MARKER);
        let mut depth = 0;

        loop {
            let placeholders = find_innermost(&output);
            if placeholders.is_empty() {
                break;
            }
            if depth >= self.max_nesting_depth {
                warn!(max_depth = self.max_nesting_depth, "placeholder nesting too deep");
                return Err(ResolveError::NestingDepthExceeded {
                    max_depth: self.max_nesting_depth,
                });
            }

            debug!(depth, count = placeholders.len(), "substituting placeholders");
            for placeholder in placeholders.into_iter().rev() {
                let value = self.resolver.resolve(&placeholder.heap)?;
                output.replace_range(placeholder.span, &render(&value));
            }

            depth += 1;
        }

        Ok(output.replace(ESCAPE_MARKER, "%"))
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        other => other.to_json_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::memory::{MemoryFileSystem, StaticEnvironment};
    use crate::ports::{CodeLoader, LoadError};
    use envres_domain::ErrorKind;
    use pretty_assertions::assert_eq;

    struct NoLoader;

    impl CodeLoader for NoLoader {
        fn load(&self, path: &std::path::Path) -> Result<Value, LoadError> {
            Err(LoadError::Unsupported(path.to_path_buf()))
        }
    }

    fn processor(environment: StaticEnvironment) -> StringProcessor {
        StringProcessor::new(Resolver::new(
            Arc::new(environment),
            Arc::new(MemoryFileSystem::new()),
            Arc::new(NoLoader),
        ))
    }

    fn process(text: &str) -> ResolveResult<String> {
        let environment = StaticEnvironment::new()
            .with_variable("HOST", "localhost")
            .with_variable("PORT", "5432")
            .with_variable("NAME_OF_HOST", "HOST")
            .with_variable("LIST", r#"["a","b"]"#);
        processor(environment).process(text)
    }

    /// Wraps `x` in `levels` nested `%env(string:direct:...)%` placeholders.
    fn nested(levels: usize) -> String {
        let mut text = "x".to_string();
        for _ in 0..levels {
            text = format!("%env(string:direct:{text})%");
        }
        text
    }

    #[test]
    fn test_plain_text_is_unchanged() {
        assert_eq!(process("no placeholders").unwrap(), "no placeholders");
        assert_eq!(process("%not_env_pattern%").unwrap(), "%not_env_pattern%");
        assert_eq!(process("").unwrap(), "");
    }

    #[test]
    fn test_simple_substitution() {
        assert_eq!(
            process("postgres://%env(HOST)%:%env(PORT)%/db").unwrap(),
            "postgres://localhost:5432/db"
        );
    }

    #[test]
    fn test_non_string_values_render_as_json() {
        assert_eq!(process("%env(json:LIST)%").unwrap(), r#"["a","b"]"#);
        assert_eq!(process("%env(json:direct:[\"a\",\"b\"])%").unwrap(), r#"["a","b"]"#);
        assert_eq!(process("%env(bool:direct:1)%").unwrap(), "true");
        assert_eq!(process("%env(bool:direct:0)%").unwrap(), "false");
        assert_eq!(process("%env(float:direct:3.25)%").unwrap(), "3.25");
        assert_eq!(process("%env(int:PORT)%").unwrap(), "5432");
    }

    #[test]
    fn test_nested_placeholder() {
        assert_eq!(process("%env(%env(NAME_OF_HOST)%)%").unwrap(), "localhost");
    }

    #[test]
    fn test_escaped_percent() {
        assert_eq!(process("100%% sure").unwrap(), "100% sure");
        assert_eq!(process("%%env(HOST)%%").unwrap(), "%env(HOST)%");
        assert_eq!(process("%%%env(HOST)%").unwrap(), "%localhost");
    }

    #[test]
    fn test_many_flat_placeholders() {
        let text = "%env(HOST)%,".repeat(200);
        let expected = "localhost,".repeat(200);
        assert_eq!(process(&text).unwrap(), expected);
    }

    #[test]
    fn test_nesting_limit() {
        assert_eq!(process(&nested(100)).unwrap(), "x");
        let error = process(&nested(101)).err().map(|e| e.kind());
        assert_eq!(error, Some(ErrorKind::NestingDepthExceeded));
    }

    #[test]
    fn test_independent_nests_share_passes() {
        let text = format!("{}-{}", nested(51), nested(51));
        assert_eq!(process(&text).unwrap(), "x-x");
    }

    #[test]
    fn test_custom_limit() {
        let processor = processor(StaticEnvironment::new()).with_max_nesting_depth(2);
        assert_eq!(processor.process(&nested(2)).unwrap(), "x");
        assert!(processor.process(&nested(3)).is_err());
    }

    #[test]
    fn test_resolution_error_propagates() {
        let error = process("a=%env(MISSING)%").err();
        assert_eq!(error.as_ref().map(ResolveError::kind), Some(ErrorKind::UndefinedReference));
        assert_eq!(error.as_ref().and_then(|e| e.heap()), Some("MISSING"));
    }

    #[test]
    fn test_process_with_custom_renderer() {
        let environment = StaticEnvironment::new().with_variable("FLAG", "yes");
        let output = processor(environment)
            .process_with("%env(bool:FLAG)%", |value| match value {
                Value::Bool(true) => "on".to_string(),
                _ => "off".to_string(),
            })
            .unwrap();
        assert_eq!(output, "on");
    }
}
