//! File system abstraction port.

use std::path::{Path, PathBuf};

/// Error type for file system operations.
#[derive(Debug, thiserror::Error)]
pub enum FileSystemError {
    /// File not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Abstraction over the file reads performed by the `file` and `require`
/// modifiers.
///
/// This trait allows replacing file system access in tests.
pub trait FileSystem: Send + Sync {
    /// Checks if a path exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Reads a file's contents as bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FileSystemError>;
}
