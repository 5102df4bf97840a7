//! Data document loader for the `require` modifier.

use std::path::Path;

use envres_application::ports::{CodeLoader, LoadError};
use envres_domain::Value;
use tracing::debug;

use crate::serialization::{DocumentFormat, SerializationError, from_document_bytes};

/// Loads JSON and YAML documents as values.
///
/// Files are parsed as data and never executed. Other extensions are
/// rejected with [`LoadError::Unsupported`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentLoader;

impl DocumentLoader {
    /// Creates a new `DocumentLoader`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CodeLoader for DocumentLoader {
    fn load(&self, path: &Path) -> Result<Value, LoadError> {
        let Some(format) = DocumentFormat::from_path(path) else {
            return Err(LoadError::Unsupported(path.to_path_buf()));
        };

        let bytes = std::fs::read(path)?;
        debug!(path = %path.display(), format = format.name(), "loading document");

        from_document_bytes::<serde_json::Value>(format, &bytes)
            .map(Value::from)
            .map_err(|error| LoadError::Parse {
                format: format.name(),
                message: match error {
                    SerializationError::Json(e) => e.to_string(),
                    SerializationError::Yaml(e) => e.to_string(),
                },
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use envres_domain::Mapping;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_json() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.json", r#"{"b":1,"a":[true,null]}"#);

        let mut expected = Mapping::new();
        expected.insert("b".into(), Value::Int(1));
        expected.insert(
            "a".into(),
            Value::Sequence(vec![Value::Bool(true), Value::Null]),
        );
        assert_eq!(DocumentLoader::new().load(&path).unwrap(), Value::Mapping(expected));
    }

    #[test]
    fn test_load_yaml() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.yaml", "database:\n  host: db\n  port: 5432\n");

        let value = DocumentLoader::new().load(&path).unwrap();
        assert_eq!(value.to_json_string(), r#"{"database":{"host":"db","port":5432}}"#);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.php", "<?php return [];");
        assert!(matches!(
            DocumentLoader::new().load(&path),
            Err(LoadError::Unsupported(_))
        ));
    }

    #[test]
    fn test_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "broken.json", "{");
        assert!(matches!(
            DocumentLoader::new().load(&path),
            Err(LoadError::Parse { format: "JSON", .. })
        ));
    }
}
