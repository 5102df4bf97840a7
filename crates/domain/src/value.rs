//! The value threaded through a pipeline.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Ordered, string-keyed mapping.
pub type Mapping = IndexMap<String, Value>;

/// Backing value of an enum case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EnumBacking {
    /// Integer-backed case.
    Int(i64),
    /// String-backed case.
    String(String),
}

impl EnumBacking {
    /// Returns true if `value` has the same type and content as this backing.
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Int(backing), Value::Int(candidate)) => backing == candidate,
            (Self::String(backing), Value::String(candidate)) => backing == candidate,
            _ => false,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Self::Int(i) => Value::Int(*i),
            Self::String(s) => Value::String(s.clone()),
        }
    }
}

/// A case of a registered backed enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumCase {
    /// Type identifier the case belongs to.
    pub enum_type: String,
    /// Case name.
    pub name: String,
    /// Backing value.
    pub backing: EnumBacking,
}

impl EnumCase {
    /// Creates an enum case.
    #[must_use]
    pub fn new(enum_type: impl Into<String>, name: impl Into<String>, backing: EnumBacking) -> Self {
        Self {
            enum_type: enum_type.into(),
            name: name.into(),
            backing,
        }
    }
}

/// Dynamically typed state produced by each step.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Initial state before any step ran.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// UTF-8 text.
    String(String),
    /// Binary content that is not valid UTF-8.
    Bytes(Vec<u8>),
    /// Ordered list.
    Sequence(Vec<Value>),
    /// Ordered string-keyed mapping.
    Mapping(Mapping),
    /// Case of a backed enum.
    EnumCase(EnumCase),
}

impl Value {
    /// Wraps raw bytes, keeping them as text when they are valid UTF-8.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Self::String(text),
            Err(err) => Self::Bytes(err.into_bytes()),
        }
    }

    /// Returns a short name of the variant for diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::EnumCase(_) => "enum",
        }
    }

    /// Returns true for booleans, numbers, strings and bytes.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::String(_) | Self::Bytes(_)
        )
    }

    /// Returns the string content if this is a `String`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Renders a scalar as text. Non-scalars yield `None`.
    ///
    /// `true` renders as `"1"` and `false` as the empty string.
    #[must_use]
    pub fn scalar_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Bool(true) => Some(Cow::Borrowed("1")),
            Self::Bool(false) => Some(Cow::Borrowed("")),
            Self::Int(i) => Some(Cow::Owned(i.to_string())),
            Self::Float(f) => Some(Cow::Owned(f.to_string())),
            Self::String(s) => Some(Cow::Borrowed(s)),
            Self::Bytes(b) => Some(String::from_utf8_lossy(b)),
            Self::Null | Self::Sequence(_) | Self::Mapping(_) | Self::EnumCase(_) => None,
        }
    }

    /// Stringifies any value.
    ///
    /// Scalars use [`Value::scalar_text`], `Null` is empty, enum cases render
    /// their backing value and structured values their compact JSON.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::EnumCase(case) => case.backing.to_value().to_text(),
            Self::Sequence(_) | Self::Mapping(_) => self.to_json_string(),
            scalar => scalar.scalar_text().map(Cow::into_owned).unwrap_or_default(),
        }
    }

    /// Converts into a JSON value. Bytes become lossy text, enum cases their
    /// backing value and non-finite floats `null`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Int(i) => serde_json::Value::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Bytes(b) => serde_json::Value::String(String::from_utf8_lossy(b).into_owned()),
            Self::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(Self::to_json).collect())
            }
            Self::Mapping(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Self::EnumCase(case) => case.backing.to_value().to_json(),
        }
    }

    /// Returns the compact JSON text of this value.
    #[must_use]
    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Float(n.as_f64().unwrap_or(f64::NAN)), Self::Int),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Self::Mapping(map)
    }
}

impl From<EnumCase> for Value {
    fn from(case: EnumCase) -> Self {
        Self::EnumCase(case)
    }
}
