//! Heap parser for `modifier:modifier:...:name` syntax
//!
//! Parts are consumed left to right, then the step list is reversed so the
//! innermost source runs first.

use std::collections::VecDeque;

use envres_domain::{Arity, Modifier, ResolveError, ResolveResult, Step};

use crate::ports::StepSource;

/// Stateless parser for heaps. Implements [`StepSource`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapParser;

impl HeapParser {
    /// Creates a new parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl StepSource for HeapParser {
    fn steps(&self, heap: &str) -> ResolveResult<Vec<Step>> {
        parse_heap(heap)
    }
}

/// Splits a heap on `:` and inserts the implicit `env` modifier.
///
/// - a single part becomes `env:<part>`
/// - when the penultimate part is not one of `const`, `direct`, `env`,
///   `file` or `require`, `env` is inserted before the last part
///
/// Only the last two raw parts are inspected, so a heap made of a bare
/// modifier keyword such as `env` is treated as a variable name.
#[must_use]
pub fn split_parts(heap: &str) -> VecDeque<&str> {
    let mut parts: VecDeque<&str> = heap.split(':').collect();
    let count = parts.len();

    if count == 1 {
        parts.push_front(Modifier::Env.as_str());
    } else if !Modifier::from_token(parts[count - 2]).is_some_and(Modifier::is_source) {
        parts.insert(count - 1, Modifier::Env.as_str());
    }

    parts
}

/// Parses a heap into steps in execution order.
///
/// # Errors
///
/// Returns [`ResolveError::InvalidHeap`] when a part is not a known modifier,
/// when `direct` is not the penultimate part, or when `enum`/`key` lack
/// their argument and an upstream source.
///
/// # Examples
///
/// ```
/// use envres_application::heap::parse_heap;
/// use envres_domain::{Modifier, Step};
///
/// let steps = parse_heap("MY_ENV").unwrap();
/// assert_eq!(steps, vec![Step::with_argument(Modifier::Env, "MY_ENV")]);
/// assert!(parse_heap("direct:a:b").is_err());
/// ```
pub fn parse_heap(heap: &str) -> ResolveResult<Vec<Step>> {
    let mut parts = split_parts(heap);
    let mut steps = Vec::with_capacity(parts.len());

    while let Some(token) = parts.pop_front() {
        let Some(modifier) = Modifier::from_token(token) else {
            return Err(ResolveError::invalid_heap(
                format!("Unexpected modifier \"{token}\""),
                heap,
            ));
        };

        let argument = match modifier.arity() {
            Arity::Lonely => None,
            Arity::NameBearing => {
                if parts.len() == 1 {
                    parts.pop_front()
                } else {
                    None
                }
            }
            Arity::MandatoryArgument => {
                if parts.len() != 1 {
                    return Err(ResolveError::invalid_heap(
                        format!("Modifier \"{modifier}\" allowed only as penultimate"),
                        heap,
                    ));
                }
                parts.pop_front()
            }
            Arity::DualArgument => {
                // argument, then at least a source modifier and its name
                if parts.len() < 3 {
                    return Err(ResolveError::invalid_heap(
                        format!("Missed argument of \"{modifier}\""),
                        heap,
                    ));
                }
                parts.pop_front()
            }
        };

        steps.push(Step {
            modifier,
            argument: argument.map(str::to_string),
        });
    }

    steps.reverse();
    tracing::trace!(heap, steps = steps.len(), "parsed heap");

    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use envres_domain::ErrorKind;
    use pretty_assertions::assert_eq;

    fn step(modifier: Modifier) -> Step {
        Step::new(modifier)
    }

    fn named(modifier: Modifier, argument: &str) -> Step {
        Step::with_argument(modifier, argument)
    }

    fn parse(heap: &str) -> Vec<Step> {
        parse_heap(heap).unwrap_or_default()
    }

    fn parse_error(heap: &str) -> Option<ErrorKind> {
        parse_heap(heap).err().map(|e| e.kind())
    }

    #[test]
    fn test_simple_env() {
        assert_eq!(parse("MY_ENV"), vec![named(Modifier::Env, "MY_ENV")]);
        assert_eq!(parse("env:MY_ENV"), vec![named(Modifier::Env, "MY_ENV")]);
        assert_eq!(
            parse("env:env:MY_ENV"),
            vec![named(Modifier::Env, "MY_ENV"), step(Modifier::Env)]
        );
    }

    #[test]
    fn test_modifier_keyword_as_env_name() {
        for keyword in ["env", "base64", "const", "direct", "file", "require", "key"] {
            assert_eq!(parse(keyword), vec![named(Modifier::Env, keyword)]);
        }
    }

    #[test]
    fn test_single_part_matches_explicit_env() {
        for name in ["MY_ENV", "", "with space", "ünïcode"] {
            assert_eq!(parse_heap(name), parse_heap(&format!("env:{name}")));
        }
    }

    #[test]
    fn test_name_bearing_sources() {
        assert_eq!(parse("const:MY_ENV"), vec![named(Modifier::Const, "MY_ENV")]);
        assert_eq!(parse("file:MY_ENV"), vec![named(Modifier::File, "MY_ENV")]);
        assert_eq!(parse("require:MY_ENV"), vec![named(Modifier::Require, "MY_ENV")]);
        assert_eq!(
            parse("const:env:MY_ENV"),
            vec![named(Modifier::Env, "MY_ENV"), step(Modifier::Const)]
        );
        assert_eq!(
            parse("require:file:MY_ENV"),
            vec![named(Modifier::File, "MY_ENV"), step(Modifier::Require)]
        );
        assert_eq!(
            parse("env:const:MY_ENV"),
            vec![named(Modifier::Const, "MY_ENV"), step(Modifier::Env)]
        );
    }

    #[test]
    fn test_lonely_modifiers_get_implicit_env() {
        assert_eq!(
            parse("base64:MY_ENV"),
            vec![named(Modifier::Env, "MY_ENV"), step(Modifier::Base64)]
        );
        assert_eq!(parse("base64:MY_ENV"), parse("base64:env:MY_ENV"));
        assert_eq!(
            parse("base64:base64:W10="),
            vec![
                named(Modifier::Env, "W10="),
                step(Modifier::Base64),
                step(Modifier::Base64)
            ]
        );
        assert_eq!(
            parse("not:bool:MY_ENV"),
            vec![
                named(Modifier::Env, "MY_ENV"),
                step(Modifier::Bool),
                step(Modifier::Not)
            ]
        );
    }

    #[test]
    fn test_direct_values() {
        assert_eq!(parse("direct:W10="), vec![named(Modifier::Direct, "W10=")]);
        assert_eq!(parse("direct:100.005"), vec![named(Modifier::Direct, "100.005")]);
        assert_eq!(
            parse("base64:base64:direct:VzEwPQ=="),
            vec![
                named(Modifier::Direct, "VzEwPQ=="),
                step(Modifier::Base64),
                step(Modifier::Base64)
            ]
        );
        assert_eq!(
            parse("bool:direct:100"),
            vec![named(Modifier::Direct, "100"), step(Modifier::Bool)]
        );
    }

    #[test]
    fn test_direct_only_as_penultimate() {
        assert_eq!(parse_error("direct:a:b"), Some(ErrorKind::InvalidHeap));
        assert_eq!(parse_error("direct:env:X"), Some(ErrorKind::InvalidHeap));
        assert_eq!(parse_error("string:direct:direct:X"), Some(ErrorKind::InvalidHeap));
    }

    #[test]
    fn test_key_and_enum_arguments() {
        assert_eq!(
            parse("key:1:json:base64:direct:W10="),
            vec![
                named(Modifier::Direct, "W10="),
                step(Modifier::Base64),
                step(Modifier::Json),
                named(Modifier::Key, "1"),
            ]
        );
        assert_eq!(
            parse("key:child:key:parent:json:MY_ENV"),
            vec![
                named(Modifier::Env, "MY_ENV"),
                step(Modifier::Json),
                named(Modifier::Key, "parent"),
                named(Modifier::Key, "child"),
            ]
        );
        assert_eq!(
            parse("enum:Letter:MY_ENV"),
            vec![named(Modifier::Env, "MY_ENV"), named(Modifier::Enum, "Letter")]
        );
    }

    #[test]
    fn test_key_needs_upstream_source() {
        // "key:a" becomes "key:env:a": the argument would swallow "env"
        assert_eq!(parse_error("key:a"), Some(ErrorKind::InvalidHeap));
        assert_eq!(parse_error("enum:direct:x"), Some(ErrorKind::InvalidHeap));
    }

    #[test]
    fn test_unknown_modifier() {
        let error = parse_heap("nope:json:MY_ENV").err();
        assert_eq!(
            error.map(|e| e.to_string()),
            Some("Unexpected modifier \"nope\" in heap: nope:json:MY_ENV".to_string())
        );
    }

    #[test]
    fn test_empty_heap_is_empty_env_name() {
        assert_eq!(parse(""), vec![named(Modifier::Env, "")]);
        assert_eq!(parse("env:"), vec![named(Modifier::Env, "")]);
    }

    #[test]
    fn test_tokens_reconstruct_parts() {
        for heap in [
            "key:child:key:parent:json:base64:direct:abc",
            "not:bool:env:X",
            "require:file:X",
        ] {
            let steps = parse(heap);
            let tokens: Vec<&str> = steps.iter().rev().flat_map(Step::tokens).collect();
            assert_eq!(tokens, split_parts(heap).into_iter().collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_heap_parser_is_step_source() {
        let parser = HeapParser::new();
        assert_eq!(parser.steps("MY_ENV"), parse_heap("MY_ENV"));
    }
}
