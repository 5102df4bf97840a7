//! Modifier registry
//!
//! The closed set of modifier names a heap may contain, with the rules for
//! how many parts each one consumes.

use std::fmt;

/// How a modifier consumes the parts that follow it in a heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Never takes an inline argument.
    Lonely,
    /// Takes the next part as its name when that part is the last one.
    NameBearing,
    /// Always takes exactly one following part, which must be the last one.
    MandatoryArgument,
    /// Takes the next part and needs an upstream source after it.
    DualArgument,
}

/// A named operation of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// Decode base64 (standard or URL-safe alphabet).
    Base64,
    /// Coerce to a boolean.
    Bool,
    /// Look up a constant.
    Const,
    /// Literal value.
    Direct,
    /// Look up a backed enum case.
    Enum,
    /// Look up an environment variable.
    Env,
    /// Read a file.
    File,
    /// Coerce to a float.
    Float,
    /// Coerce to an integer.
    Int,
    /// Decode JSON.
    Json,
    /// Coerce to a boolean and invert.
    Not,
    /// Index a mapping or sequence.
    Key,
    /// Parse a query string.
    QueryString,
    /// Load a document through the code loader.
    Require,
    /// Split one CSV record.
    StrCsv,
    /// Stringify.
    String,
    /// Stringify and strip whitespace.
    Trim,
    /// Split a URL into its components.
    Url,
    /// Form-urlencode.
    UrlEncode,
}

impl Modifier {
    /// Every modifier, in alphabetical order of token.
    pub const ALL: [Self; 19] = [
        Self::Base64,
        Self::Bool,
        Self::Const,
        Self::Direct,
        Self::Enum,
        Self::Env,
        Self::File,
        Self::Float,
        Self::Int,
        Self::Json,
        Self::Key,
        Self::Not,
        Self::QueryString,
        Self::Require,
        Self::StrCsv,
        Self::String,
        Self::Trim,
        Self::Url,
        Self::UrlEncode,
    ];

    /// Classifies a heap token. Returns `None` for unknown tokens.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        let modifier = match token {
            "base64" => Self::Base64,
            "bool" => Self::Bool,
            "const" => Self::Const,
            "direct" => Self::Direct,
            "enum" => Self::Enum,
            "env" => Self::Env,
            "file" => Self::File,
            "float" => Self::Float,
            "int" => Self::Int,
            "json" => Self::Json,
            "not" => Self::Not,
            "key" => Self::Key,
            "query_string" => Self::QueryString,
            "require" => Self::Require,
            "strcsv" => Self::StrCsv,
            "string" => Self::String,
            "trim" => Self::Trim,
            "url" => Self::Url,
            "urlencode" => Self::UrlEncode,
            _ => return None,
        };
        Some(modifier)
    }

    /// Returns true if the token names a modifier.
    #[must_use]
    pub fn is_known(token: &str) -> bool {
        Self::from_token(token).is_some()
    }

    /// Returns the heap token for this modifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Base64 => "base64",
            Self::Bool => "bool",
            Self::Const => "const",
            Self::Direct => "direct",
            Self::Enum => "enum",
            Self::Env => "env",
            Self::File => "file",
            Self::Float => "float",
            Self::Int => "int",
            Self::Json => "json",
            Self::Not => "not",
            Self::Key => "key",
            Self::QueryString => "query_string",
            Self::Require => "require",
            Self::StrCsv => "strcsv",
            Self::String => "string",
            Self::Trim => "trim",
            Self::Url => "url",
            Self::UrlEncode => "urlencode",
        }
    }

    /// Returns the arity class of this modifier.
    #[must_use]
    pub const fn arity(self) -> Arity {
        match self {
            Self::Const | Self::Env | Self::File | Self::Require => Arity::NameBearing,
            Self::Direct => Arity::MandatoryArgument,
            Self::Enum | Self::Key => Arity::DualArgument,
            Self::Base64
            | Self::Bool
            | Self::Float
            | Self::Int
            | Self::Json
            | Self::Not
            | Self::QueryString
            | Self::StrCsv
            | Self::String
            | Self::Trim
            | Self::Url
            | Self::UrlEncode => Arity::Lonely,
        }
    }

    /// Returns true for modifiers that may directly precede the final part.
    ///
    /// When the penultimate part of a heap is anything else, an implicit
    /// `env` is inserted before the final part.
    #[must_use]
    pub const fn is_source(self) -> bool {
        matches!(self.arity(), Arity::NameBearing | Arity::MandatoryArgument)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
