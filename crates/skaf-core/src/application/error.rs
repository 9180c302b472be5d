//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O ports, not in
//! structure logic. Structure logic errors are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while loading, materializing, or persisting.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The structure document does not exist.
    #[error("Structure file not found: {path}")]
    StructureNotFound { path: PathBuf },

    /// The structure document exists but could not be parsed.
    #[error("Failed to parse structure file {path}: {reason}")]
    StructureParse { path: PathBuf, reason: String },

    /// The snapshot file exists but could not be read or parsed.
    #[error("Failed to read snapshot {path}: {reason}")]
    SnapshotRead { path: PathBuf, reason: String },

    /// The reconciled snapshot could not be written.
    #[error("Failed to write snapshot {path}: {reason}")]
    SnapshotWrite { path: PathBuf, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// An external command could not be started or exited unsuccessfully.
    #[error("Command `{command}` failed: {reason}")]
    CommandFailed { command: String, reason: String },

    /// A file the user asked to create is already there.
    #[error("File already exists at {path}")]
    AlreadyExists { path: PathBuf },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::StructureNotFound { path } => vec![
                format!("No structure file at: {}", path.display()),
                "Pass a different file with --file".into(),
                "Or create an example with: skaf init".into(),
            ],
            Self::StructureParse { .. } => vec![
                "Check the YAML syntax of your structure file".into(),
                "Run: skaf validate".into(),
            ],
            Self::SnapshotRead { path, .. } => vec![
                format!("The snapshot at {} looks corrupt", path.display()),
                "Delete it to start from an empty baseline".into(),
            ],
            Self::SnapshotWrite { path, .. } | Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::CommandFailed { command, .. } => vec![
                format!("Make sure `{}` is installed and on your PATH", program(command)),
                "Run with -v to see the command output".into(),
            ],
            Self::AlreadyExists { .. } => vec!["Use --force to overwrite".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::StructureNotFound { .. } => ErrorCategory::NotFound,
            Self::StructureParse { .. } | Self::AlreadyExists { .. } => ErrorCategory::Validation,
            Self::SnapshotRead { .. }
            | Self::SnapshotWrite { .. }
            | Self::FilesystemError { .. }
            | Self::CommandFailed { .. } => ErrorCategory::Internal,
        }
    }
}

fn program(command: &str) -> &str {
    command.split_whitespace().next().unwrap_or(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_structure_is_not_found() {
        let err = ApplicationError::StructureNotFound {
            path: "structure.yaml".into(),
        };
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.suggestions().iter().any(|s| s.contains("skaf init")));
    }

    #[test]
    fn command_suggestion_names_the_program() {
        let err = ApplicationError::CommandFailed {
            command: "dotnet new sln -n Api".into(),
            reason: "exit status 1".into(),
        };
        assert!(err.suggestions()[0].contains("`dotnet`"));
    }
}
