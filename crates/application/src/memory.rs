//! In-memory implementations of the ports
//!
//! Tables for constants and backed enums have no natural system-wide source,
//! so these are the implementations used in production as well as in tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use envres_domain::{EnumBacking, EnumCase, Value};
use indexmap::IndexMap;

use crate::ports::{ConstantTable, EnumRegistry, EnvironmentLookup, FileSystem, FileSystemError};

/// Environment backed only by an explicit variable map.
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    variables: HashMap<String, String>,
}

impl StaticEnvironment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }
}

impl EnvironmentLookup for StaticEnvironment {
    fn lookup(&self, name: &str) -> Option<String> {
        self.variables.get(name).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for StaticEnvironment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            variables: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Named constants for the `const` modifier.
#[derive(Debug, Clone, Default)]
pub struct Constants {
    values: HashMap<String, Value>,
}

impl Constants {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table seeded with the platform constants `OS`, `ARCH`,
    /// `FAMILY` and `EXE_SUFFIX`.
    #[must_use]
    pub fn system() -> Self {
        Self::new()
            .with_constant("OS", std::env::consts::OS)
            .with_constant("ARCH", std::env::consts::ARCH)
            .with_constant("FAMILY", std::env::consts::FAMILY)
            .with_constant("EXE_SUFFIX", std::env::consts::EXE_SUFFIX)
    }

    /// Adds a constant.
    #[must_use]
    pub fn with_constant(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.define(name, value);
        self
    }

    /// Defines or redefines a constant.
    pub fn define(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }
}

impl ConstantTable for Constants {
    fn lookup_constant(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }
}

/// A Rust enum that can be registered as a backed enum.
///
/// # Examples
///
/// ```
/// use envres_application::{BackedEnum, EnumTypes, EnumRegistry};
/// use envres_domain::{EnumBacking, Value};
///
/// enum Stage {
///     Dev,
///     Prod,
/// }
///
/// impl BackedEnum for Stage {
///     const TYPE_NAME: &'static str = "Stage";
///
///     fn cases() -> Vec<(&'static str, EnumBacking)> {
///         vec![
///             ("Dev", EnumBacking::String("dev".into())),
///             ("Prod", EnumBacking::String("prod".into())),
///         ]
///     }
/// }
///
/// let enums = EnumTypes::new().with::<Stage>();
/// let case = enums.try_from_value("Stage", &Value::from("prod")).unwrap();
/// assert_eq!(case.name, "Prod");
/// ```
pub trait BackedEnum {
    /// Type identifier used in heaps (`enum:<TYPE_NAME>:...`).
    const TYPE_NAME: &'static str;

    /// Case names with their backing values.
    fn cases() -> Vec<(&'static str, EnumBacking)>;
}

/// Registry of backed enums keyed by type identifier.
#[derive(Debug, Clone, Default)]
pub struct EnumTypes {
    types: HashMap<String, IndexMap<String, EnumBacking>>,
}

impl EnumTypes {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a [`BackedEnum`] implementor.
    #[must_use]
    pub fn with<E: BackedEnum>(mut self) -> Self {
        self.register(E::TYPE_NAME, E::cases());
        self
    }

    /// Registers an enum type from its cases.
    pub fn register<N, I>(&mut self, enum_type: impl Into<String>, cases: I)
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, EnumBacking)>,
    {
        let cases = cases
            .into_iter()
            .map(|(name, backing)| (name.into(), backing))
            .collect();
        self.types.insert(enum_type.into(), cases);
    }
}

impl EnumRegistry for EnumTypes {
    fn is_backed_enum(&self, enum_type: &str) -> bool {
        self.types.contains_key(enum_type)
    }

    fn try_from_value(&self, enum_type: &str, value: &Value) -> Option<EnumCase> {
        self.types
            .get(enum_type)?
            .iter()
            .find(|(_, backing)| backing.matches(value))
            .map(|(name, backing)| EnumCase::new(enum_type, name.clone(), backing.clone()))
    }
}

/// File system holding files in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryFileSystem {
    /// Creates an empty file system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }
}

impl FileSystem for MemoryFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FileSystemError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| FileSystemError::NotFound(path.to_path_buf()))
    }
}
