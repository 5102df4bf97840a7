//! Real file system implementation.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use envres_application::ports::{FileSystem, FileSystemError};

/// Real file system implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// Creates a new `LocalFileSystem`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        fs::metadata(path).is_ok_and(|m| m.is_file())
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FileSystemError> {
        fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => FileSystemError::NotFound(path.to_path_buf()),
            ErrorKind::PermissionDenied => FileSystemError::PermissionDenied(path.to_path_buf()),
            _ => FileSystemError::Io(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_read_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secret.txt");
        fs::write(&path, b"s3cr3t").unwrap();

        let fs = LocalFileSystem::new();
        assert!(fs.is_file(&path));
        assert_eq!(fs.read_file(&path).unwrap(), b"s3cr3t".to_vec());
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = TempDir::new().unwrap();
        assert!(!LocalFileSystem::new().is_file(dir.path()));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.txt");

        let fs = LocalFileSystem::new();
        assert!(!fs.is_file(&path));
        assert!(matches!(
            fs.read_file(&path),
            Err(FileSystemError::NotFound(_))
        ));
    }
}
