//! Pipeline steps

use std::fmt;

use crate::modifier::Modifier;

/// One parsed unit of a heap: a modifier and its optional inline argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Step {
    /// The operation to apply.
    pub modifier: Modifier,

    /// The part consumed as argument, if the arity rules took one.
    pub argument: Option<String>,
}

impl Step {
    /// Creates a step without an argument.
    #[must_use]
    pub const fn new(modifier: Modifier) -> Self {
        Self {
            modifier,
            argument: None,
        }
    }

    /// Creates a step carrying an inline argument.
    #[must_use]
    pub fn with_argument(modifier: Modifier, argument: impl Into<String>) -> Self {
        Self {
            modifier,
            argument: Some(argument.into()),
        }
    }

    /// Returns the heap parts this step was built from, in heap order.
    #[must_use]
    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens = vec![self.modifier.as_str()];
        if let Some(argument) = &self.argument {
            tokens.push(argument);
        }
        tokens
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.argument {
            Some(argument) => write!(f, "{}:{argument}", self.modifier),
            None => write!(f, "{}", self.modifier),
        }
    }
}
