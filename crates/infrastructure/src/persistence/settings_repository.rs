//! Resolver settings persistence.
//!
//! Settings live in a JSON or YAML file. A missing file yields the defaults.
//! `ENVRES_MAX_NESTING_DEPTH` overrides the nesting limit.

use std::path::Path;

use envres_application::ports::EnvironmentLookup;
use envres_domain::ResolverSettings;
use tracing::debug;

use crate::serialization::{DocumentFormat, SerializationError, from_document_bytes};

/// Environment variable overriding `max_nesting_depth`.
pub const MAX_NESTING_DEPTH_VAR: &str = "ENVRES_MAX_NESTING_DEPTH";

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// The settings file has an unknown extension.
    #[error("Unsupported settings file: {0}")]
    UnsupportedFormat(String),

    /// An override variable holds an unusable value.
    #[error("Invalid value for {name}: {value:?}")]
    InvalidOverride {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Repository for resolver settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsRepository;

impl SettingsRepository {
    /// Creates a new settings repository.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Loads settings from `path`.
    ///
    /// Returns default settings if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(&self, path: &Path) -> Result<ResolverSettings, SettingsError> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(ResolverSettings::default());
        }

        let format = DocumentFormat::from_path(path)
            .ok_or_else(|| SettingsError::UnsupportedFormat(path.display().to_string()))?;
        let content = std::fs::read(path)?;
        let settings = from_document_bytes(format, &content)?;
        Ok(settings)
    }

    /// Applies environment overrides on top of `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidOverride`] when the override is not a
    /// non-negative integer.
    pub fn apply_overrides(
        &self,
        mut settings: ResolverSettings,
        environment: &dyn EnvironmentLookup,
    ) -> Result<ResolverSettings, SettingsError> {
        if let Some(raw) = environment.lookup(MAX_NESTING_DEPTH_VAR) {
            settings.max_nesting_depth =
                raw.trim()
                    .parse()
                    .map_err(|_| SettingsError::InvalidOverride {
                        name: MAX_NESTING_DEPTH_VAR,
                        value: raw.clone(),
                    })?;
            debug!(max_nesting_depth = settings.max_nesting_depth, "nesting limit overridden");
        }
        Ok(settings)
    }

    /// Loads settings from `path` and applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if loading or an override fails.
    pub fn load_with_overrides(
        &self,
        path: &Path,
        environment: &dyn EnvironmentLookup,
    ) -> Result<ResolverSettings, SettingsError> {
        let settings = self.load(path)?;
        self.apply_overrides(settings, environment)
    }
}
