//! JSON and YAML deserialization helpers.

use std::path::Path;

use serde::de::DeserializeOwned;

/// Error type for deserialization.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML deserialization failed.
    #[error("YAML deserialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.json`
    Json,
    /// `.yaml` or `.yml`
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from the extension of `path` (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Human readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }
}

/// Deserializes JSON from bytes.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Deserializes YAML from bytes.
///
/// # Errors
///
/// Returns an error if the YAML is invalid or doesn't match the expected type.
pub fn from_yaml_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    Ok(serde_yaml::from_slice(bytes)?)
}

/// Deserializes bytes in the given format.
///
/// # Errors
///
/// Returns an error if the document is invalid or doesn't match the expected
/// type.
pub fn from_document_bytes<T: DeserializeOwned>(
    format: DocumentFormat,
    bytes: &[u8],
) -> Result<T, SerializationError> {
    match format {
        DocumentFormat::Json => from_json_bytes(bytes),
        DocumentFormat::Yaml => from_yaml_bytes(bytes),
    }
}
