//! Resolution error types

use std::fmt;

use thiserror::Error;

/// What kind of named reference could not be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// A variable looked up through the environment.
    EnvironmentVariable,
    /// A constant looked up through the constant table.
    Constant,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnvironmentVariable => f.write_str("environment variable"),
            Self::Constant => f.write_str("constant"),
        }
    }
}

/// Category of a [`ResolveError`], for callers that only need to classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Grammar violation in the modifier chain.
    InvalidHeap,
    /// A name resolved to a non-scalar value.
    InvalidName,
    /// The referenced type is not a registered backed enum.
    InvalidEnum,
    /// A value failed a modifier's precondition.
    InvalidValue,
    /// Environment variable or constant does not exist.
    UndefinedReference,
    /// Indexing key or position is absent.
    KeyNotFound,
    /// No enum case is backed by the value.
    UnsupportedCase,
    /// Referenced path is missing or not a regular file.
    FileNotFound,
    /// Referenced file could not be read.
    FileRead,
    /// A `require` document could not be loaded.
    Load,
    /// The substitution pass hit its nesting limit.
    NestingDepthExceeded,
}

/// Errors raised while parsing or interpreting a heap, or while substituting
/// placeholders.
///
/// Every variant raised by the parser or the interpreter carries the full
/// heap so a failure can be traced back to its placeholder.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The heap does not follow the modifier grammar.
    #[error("{reason} in heap: {heap}")]
    InvalidHeap {
        /// What is wrong with the heap.
        reason: String,
        /// Heap being resolved.
        heap: String,
    },

    /// A name operand is not a scalar.
    #[error("invalid {subject} name: value of type \"{found}\" is non-scalar (resolved from \"{heap}\")")]
    InvalidName {
        /// What the name was meant to identify.
        subject: &'static str,
        /// Type of the offending value.
        found: &'static str,
        /// Heap being resolved.
        heap: String,
    },

    /// The type identifier does not name a registered backed enum.
    #[error("\"{enum_type}\" is not a backed enum (resolved from \"{heap}\")")]
    InvalidEnum {
        /// Requested enum type.
        enum_type: String,
        /// Heap being resolved.
        heap: String,
    },

    /// The current value does not satisfy a modifier.
    #[error("{reason} (resolved from \"{heap}\")")]
    InvalidValue {
        /// Why the value was rejected.
        reason: String,
        /// Heap being resolved.
        heap: String,
    },

    /// A named variable or constant is not defined.
    #[error("undefined {kind} \"{name}\" (resolved from \"{heap}\")")]
    UndefinedReference {
        /// What was looked up.
        kind: ReferenceKind,
        /// Name that was looked up.
        name: String,
        /// Heap being resolved.
        heap: String,
    },

    /// A key or index is missing from a mapping or sequence.
    #[error("key \"{key}\" not found in {target} (resolved from \"{heap}\")")]
    KeyNotFound {
        /// Requested key.
        key: String,
        /// Compact JSON of the indexed value.
        target: String,
        /// Heap being resolved.
        heap: String,
    },

    /// The value is not the backing value of any case.
    #[error("enum value {value} is not backed by \"{enum_type}\" (resolved from \"{heap}\")")]
    UnsupportedCase {
        /// Enum type that was searched.
        enum_type: String,
        /// Compact JSON of the value.
        value: String,
        /// Heap being resolved.
        heap: String,
    },

    /// The path does not name an existing regular file.
    #[error("file \"{path}\" not found (resolved from \"{heap}\")")]
    FileNotFound {
        /// Requested path.
        path: String,
        /// Heap being resolved.
        heap: String,
    },

    /// The file exists but could not be read.
    #[error("file \"{path}\" not readable: {reason} (resolved from \"{heap}\")")]
    FileRead {
        /// Requested path.
        path: String,
        /// Underlying I/O failure.
        reason: String,
        /// Heap being resolved.
        heap: String,
    },

    /// The code loader failed to produce a value.
    #[error("cannot load \"{path}\": {reason} (resolved from \"{heap}\")")]
    Load {
        /// Requested path.
        path: String,
        /// Underlying loader failure.
        reason: String,
        /// Heap being resolved.
        heap: String,
    },

    /// Too many nested substitution passes.
    #[error("maximum nesting depth exceeded while processing string (limit {max_depth})")]
    NestingDepthExceeded {
        /// Configured limit.
        max_depth: usize,
    },
}

impl ResolveError {
    /// Creates an [`ResolveError::InvalidHeap`].
    pub fn invalid_heap(reason: impl Into<String>, heap: &str) -> Self {
        Self::InvalidHeap {
            reason: reason.into(),
            heap: heap.to_string(),
        }
    }

    /// Creates an [`ResolveError::InvalidValue`].
    pub fn invalid_value(reason: impl Into<String>, heap: &str) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
            heap: heap.to_string(),
        }
    }

    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidHeap { .. } => ErrorKind::InvalidHeap,
            Self::InvalidName { .. } => ErrorKind::InvalidName,
            Self::InvalidEnum { .. } => ErrorKind::InvalidEnum,
            Self::InvalidValue { .. } => ErrorKind::InvalidValue,
            Self::UndefinedReference { .. } => ErrorKind::UndefinedReference,
            Self::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            Self::UnsupportedCase { .. } => ErrorKind::UnsupportedCase,
            Self::FileNotFound { .. } => ErrorKind::FileNotFound,
            Self::FileRead { .. } => ErrorKind::FileRead,
            Self::Load { .. } => ErrorKind::Load,
            Self::NestingDepthExceeded { .. } => ErrorKind::NestingDepthExceeded,
        }
    }

    /// Returns the heap the error was raised for, if any.
    #[must_use]
    pub fn heap(&self) -> Option<&str> {
        match self {
            Self::InvalidHeap { heap, .. }
            | Self::InvalidName { heap, .. }
            | Self::InvalidEnum { heap, .. }
            | Self::InvalidValue { heap, .. }
            | Self::UndefinedReference { heap, .. }
            | Self::KeyNotFound { heap, .. }
            | Self::UnsupportedCase { heap, .. }
            | Self::FileNotFound { heap, .. }
            | Self::FileRead { heap, .. }
            | Self::Load { heap, .. } => Some(heap),
            Self::NestingDepthExceeded { .. } => None,
        }
    }
}

/// Result type alias for resolution operations.
pub type ResolveResult<T> = Result<T, ResolveError>;
