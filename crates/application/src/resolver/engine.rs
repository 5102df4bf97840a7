//! Step interpreter
//!
//! Folds a step list over a single [`Value`], starting from `Null`. The first
//! failure short-circuits.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use envres_domain::{Modifier, ReferenceKind, ResolveError, ResolveResult, Step, Value};
use tracing::{debug, trace};

use super::{codecs, filters, query, url};
use crate::heap::HeapParser;
use crate::memory::{Constants, EnumTypes};
use crate::ports::{
    CodeLoader, ConstantTable, EnumRegistry, EnvironmentLookup, FileSystem, FileSystemError,
    HeapResolver, StepSource,
};

/// Resolves heaps against injected environment, file system, code loader,
/// constant and enum capabilities.
#[derive(Clone)]
pub struct Resolver {
    environment: Arc<dyn EnvironmentLookup>,
    file_system: Arc<dyn FileSystem>,
    code_loader: Arc<dyn CodeLoader>,
    constants: Arc<dyn ConstantTable>,
    enums: Arc<dyn EnumRegistry>,
    step_source: Arc<dyn StepSource>,
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver").finish_non_exhaustive()
    }
}

impl Resolver {
    /// Creates a resolver with an empty constant table, no registered enums
    /// and the default heap parser.
    #[must_use]
    pub fn new(
        environment: Arc<dyn EnvironmentLookup>,
        file_system: Arc<dyn FileSystem>,
        code_loader: Arc<dyn CodeLoader>,
    ) -> Self {
        Self {
            environment,
            file_system,
            code_loader,
            constants: Arc::new(Constants::new()),
            enums: Arc::new(EnumTypes::new()),
            step_source: Arc::new(HeapParser::new()),
        }
    }

    /// Replaces the constant table.
    #[must_use]
    pub fn with_constants(mut self, constants: Arc<dyn ConstantTable>) -> Self {
        self.constants = constants;
        self
    }

    /// Replaces the enum registry.
    #[must_use]
    pub fn with_enums(mut self, enums: Arc<dyn EnumRegistry>) -> Self {
        self.enums = enums;
        self
    }

    /// Replaces the heap parser.
    #[must_use]
    pub fn with_step_source(mut self, step_source: Arc<dyn StepSource>) -> Self {
        self.step_source = step_source;
        self
    }

    /// Parses `heap` without interpreting it.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidHeap`] for grammar violations.
    pub fn steps(&self, heap: &str) -> ResolveResult<Vec<Step>> {
        self.step_source.steps(heap)
    }

    /// Parses and interprets `heap`.
    ///
    /// # Errors
    ///
    /// Returns the first parse or interpretation failure. Every error carries
    /// `heap`.
    pub fn resolve(&self, heap: &str) -> ResolveResult<Value> {
        let steps = self.steps(heap)?;
        self.interpret(&steps, heap)
    }

    /// Interprets an already parsed step list. `heap` is only used in errors.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error.
    pub fn interpret(&self, steps: &[Step], heap: &str) -> ResolveResult<Value> {
        let mut value = Value::Null;

        for step in steps {
            trace!(heap, step = %step, input = value.type_name(), "applying step");
            value = self.apply(step, value, heap)?;
        }

        debug!(heap, result = value.type_name(), "resolved heap");
        Ok(value)
    }

    fn apply(&self, step: &Step, value: Value, heap: &str) -> ResolveResult<Value> {
        match step.modifier {
            Modifier::Base64 => resolve_base64(step, &value, heap),
            Modifier::Bool => resolve_bool(step, &value, heap).map(Value::Bool),
            Modifier::Not => resolve_bool(step, &value, heap).map(|b| Value::Bool(!b)),
            Modifier::Const => self.resolve_const(step, &value, heap),
            Modifier::Direct => resolve_direct(step, heap),
            Modifier::Enum => self.resolve_enum(step, &value, heap),
            Modifier::Env => self.resolve_env(step, &value, heap),
            Modifier::File => self.resolve_file(step, &value, heap),
            Modifier::Require => self.resolve_require(step, &value, heap),
            Modifier::Float => resolve_float(&value, heap),
            Modifier::Int => resolve_int(&value, heap),
            Modifier::Json => resolve_json(&value, heap),
            Modifier::Key => resolve_key(step, &value, heap),
            Modifier::QueryString => Ok(Value::Mapping(query::parse_query(
                &query::query_component(&value.to_text()),
            ))),
            Modifier::StrCsv => resolve_csv(&value, heap),
            Modifier::String => Ok(Value::String(value.to_text())),
            Modifier::Trim => Ok(Value::from(codecs::trim_whitespace(&value.to_text()))),
            Modifier::Url => resolve_url(&value, heap),
            Modifier::UrlEncode => Ok(Value::String(codecs::form_urlencode(&value.to_text()))),
        }
    }

    fn resolve_const(&self, step: &Step, value: &Value, heap: &str) -> ResolveResult<Value> {
        let name = name_operand(step, value, "constant", heap)?;
        self.constants
            .lookup_constant(&name)
            .ok_or_else(|| ResolveError::UndefinedReference {
                kind: ReferenceKind::Constant,
                name: name.into_owned(),
                heap: heap.to_string(),
            })
    }

    fn resolve_env(&self, step: &Step, value: &Value, heap: &str) -> ResolveResult<Value> {
        let name = name_operand(step, value, "environment", heap)?;
        self.environment
            .lookup(&name)
            .map(Value::String)
            .ok_or_else(|| ResolveError::UndefinedReference {
                kind: ReferenceKind::EnvironmentVariable,
                name: name.into_owned(),
                heap: heap.to_string(),
            })
    }

    fn resolve_enum(&self, step: &Step, value: &Value, heap: &str) -> ResolveResult<Value> {
        if !matches!(value, Value::String(_) | Value::Int(_)) {
            return Err(ResolveError::invalid_value(
                "Resolved value did not result in a string or int",
                heap,
            ));
        }

        let enum_type = step.argument.as_deref().unwrap_or_default();
        if !self.enums.is_backed_enum(enum_type) {
            return Err(ResolveError::InvalidEnum {
                enum_type: enum_type.to_string(),
                heap: heap.to_string(),
            });
        }

        self.enums
            .try_from_value(enum_type, value)
            .map(Value::EnumCase)
            .ok_or_else(|| ResolveError::UnsupportedCase {
                enum_type: enum_type.to_string(),
                value: value.to_json_string(),
                heap: heap.to_string(),
            })
    }

    fn resolve_file(&self, step: &Step, value: &Value, heap: &str) -> ResolveResult<Value> {
        let name = self.existing_file(step, value, heap)?;
        let read = self.file_system.read_file(Path::new(name.as_ref()));
        match read {
            Ok(bytes) => Ok(Value::from_bytes(bytes)),
            Err(FileSystemError::NotFound(_)) => Err(ResolveError::FileNotFound {
                path: name.into_owned(),
                heap: heap.to_string(),
            }),
            Err(error) => Err(ResolveError::FileRead {
                path: name.into_owned(),
                reason: error.to_string(),
                heap: heap.to_string(),
            }),
        }
    }

    fn resolve_require(&self, step: &Step, value: &Value, heap: &str) -> ResolveResult<Value> {
        let name = self.existing_file(step, value, heap)?;
        self.code_loader
            .load(Path::new(name.as_ref()))
            .map_err(|error| ResolveError::Load {
                path: name.into_owned(),
                reason: error.to_string(),
                heap: heap.to_string(),
            })
    }

    fn existing_file<'a>(
        &self,
        step: &'a Step,
        value: &'a Value,
        heap: &str,
    ) -> ResolveResult<Cow<'a, str>> {
        let name = name_operand(step, value, "file", heap)?;
        if self.file_system.is_file(Path::new(name.as_ref())) {
            Ok(name)
        } else {
            Err(ResolveError::FileNotFound {
                path: name.into_owned(),
                heap: heap.to_string(),
            })
        }
    }
}

impl HeapResolver for Resolver {
    fn resolve(&self, heap: &str) -> ResolveResult<Value> {
        Self::resolve(self, heap)
    }
}

/// The inline argument if present, else the current value as text.
fn name_operand<'a>(
    step: &'a Step,
    value: &'a Value,
    subject: &'static str,
    heap: &str,
) -> ResolveResult<Cow<'a, str>> {
    if let Some(argument) = step.argument.as_deref() {
        return Ok(Cow::Borrowed(argument));
    }
    value.scalar_text().ok_or_else(|| ResolveError::InvalidName {
        subject,
        found: value.type_name(),
        heap: heap.to_string(),
    })
}

fn resolve_base64(step: &Step, value: &Value, heap: &str) -> ResolveResult<Value> {
    let encoded = match step.argument.as_deref() {
        Some(argument) => Cow::Borrowed(argument),
        None => value
            .scalar_text()
            .ok_or_else(|| ResolveError::invalid_value("Non-scalar base64", heap))?,
    };

    match codecs::decode_base64(&encoded) {
        Ok(bytes) => Ok(Value::from_bytes(bytes)),
        Err(codecs::Base64Failure::Charset) => {
            Err(ResolveError::invalid_value("Invalid base64", heap))
        }
        Err(codecs::Base64Failure::Decode) => {
            Err(ResolveError::invalid_value("Cannot decode base64", heap))
        }
    }
}

fn resolve_bool(step: &Step, value: &Value, heap: &str) -> ResolveResult<bool> {
    if step.argument.is_some() {
        return Err(ResolveError::invalid_value(
            format!("Modifier \"{}\" takes no argument", step.modifier),
            heap,
        ));
    }
    Ok(filters::truthy(value))
}

fn resolve_direct(step: &Step, heap: &str) -> ResolveResult<Value> {
    step.argument
        .as_deref()
        .map(Value::from)
        .ok_or_else(|| ResolveError::invalid_value("Undefined direct value", heap))
}

fn resolve_float(value: &Value, heap: &str) -> ResolveResult<Value> {
    filters::to_float(value).map(Value::Float).ok_or_else(|| {
        ResolveError::invalid_value("Non-numeric env var cannot be cast to float", heap)
    })
}

fn resolve_int(value: &Value, heap: &str) -> ResolveResult<Value> {
    filters::to_int(value).map(Value::Int).ok_or_else(|| {
        ResolveError::invalid_value("Non-numeric env var cannot be cast to int", heap)
    })
}

fn resolve_json(value: &Value, heap: &str) -> ResolveResult<Value> {
    if let Value::Bytes(bytes) = value
        && std::str::from_utf8(bytes).is_err()
    {
        return Err(ResolveError::invalid_value(
            "Invalid JSON \"Malformed UTF-8 characters\"",
            heap,
        ));
    }

    let text = value
        .scalar_text()
        .ok_or_else(|| ResolveError::invalid_value("Non-scalar JSON source", heap))?;

    serde_json::from_str::<serde_json::Value>(&text)
        .map(Value::from)
        .map_err(|error| ResolveError::invalid_value(format!("Invalid JSON \"{error}\""), heap))
}

fn resolve_key(step: &Step, value: &Value, heap: &str) -> ResolveResult<Value> {
    let key = step.argument.as_deref().unwrap_or_default();

    let found = match value {
        Value::Sequence(items) => sequence_index(key).and_then(|index| items.get(index).cloned()),
        Value::Mapping(map) => map.get(key).cloned(),
        _ => {
            return Err(ResolveError::invalid_value(
                "Cannot get value by key from not array value",
                heap,
            ));
        }
    };

    found.ok_or_else(|| ResolveError::KeyNotFound {
        key: key.to_string(),
        target: value.to_json_string(),
        heap: heap.to_string(),
    })
}

/// Canonical non-negative decimal index: no sign, no leading zeros.
fn sequence_index(key: &str) -> Option<usize> {
    let canonical = key == "0" || (!key.starts_with('0') && key.bytes().all(|b| b.is_ascii_digit()));
    if canonical { key.parse().ok() } else { None }
}

fn resolve_csv(value: &Value, heap: &str) -> ResolveResult<Value> {
    let text = value
        .scalar_text()
        .ok_or_else(|| ResolveError::invalid_value("Non-scalar csv", heap))?;

    if text.is_empty() {
        return Ok(Value::Sequence(Vec::new()));
    }

    Ok(Value::Sequence(
        codecs::split_csv_record(&text)
            .into_iter()
            .map(Value::String)
            .collect(),
    ))
}

fn resolve_url(value: &Value, heap: &str) -> ResolveResult<Value> {
    let text = value
        .scalar_text()
        .ok_or_else(|| ResolveError::invalid_value("Invalid URL in env var", heap))?;

    url::decompose_url(&text)
        .map(Value::Mapping)
        .map_err(|reason| ResolveError::invalid_value(reason, heap))
}
