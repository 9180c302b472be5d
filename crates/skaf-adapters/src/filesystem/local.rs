//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use skaf_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{SkafError, SkafResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> SkafResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> SkafResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_to_string(&self, path: &Path) -> SkafResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_dir_all(&self, path: &Path) -> SkafResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

pub(crate) fn map_io_error(path: &Path, e: io::Error, operation: &str) -> SkafError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        let nested = dir.path().join("Services/Api/src");

        fs.create_dir_all(&nested).unwrap();
        fs.write_file(&nested.join("Api.csproj"), "<Project />").unwrap();

        assert!(fs.exists(&nested.join("Api.csproj")));
        assert_eq!(
            fs.read_to_string(&nested.join("Api.csproj")).unwrap(),
            "<Project />"
        );

        fs.remove_dir_all(&dir.path().join("Services")).unwrap();
        assert!(!fs.exists(&nested));
    }

    #[test]
    fn missing_file_is_a_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocalFilesystem::new()
            .read_to_string(&dir.path().join("absent.txt"))
            .unwrap_err();

        assert!(matches!(
            err,
            SkafError::Application(ApplicationError::FilesystemError { .. })
        ));
    }
}
