//! Code loader port for the `require` modifier.

use std::path::{Path, PathBuf};

use envres_domain::Value;

/// Error type for loading a `require` target.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file content could not be evaluated.
    #[error("{format} error: {message}")]
    Parse {
        /// Document format that was attempted.
        format: &'static str,
        /// Parser diagnostic.
        message: String,
    },

    /// The loader does not know how to evaluate this file.
    #[error("unsupported document: {0}")]
    Unsupported(PathBuf),
}

/// Evaluates a file and returns the value it produces.
///
/// This is the trusted-input-only capability behind `require`: whatever the
/// implementation does with the file is done with the caller's privileges.
/// Only point it at configuration sources you control.
pub trait CodeLoader: Send + Sync {
    /// Loads the file at `path` and returns its value.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or evaluated.
    fn load(&self, path: &Path) -> Result<Value, LoadError>;
}
