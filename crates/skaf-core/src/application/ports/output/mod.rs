//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `skaf-adapters` crate provides implementations.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::{DesiredStructure, Layout, StructureSnapshot};
use crate::error::SkafResult;

/// Port for loading the declarative structure document.
///
/// Implemented by:
/// - `skaf_adapters::YamlStructureSource`
#[cfg_attr(test, mockall::automock)]
pub trait StructureSource: Send + Sync {
    /// Load and parse the document at `path`. Failures are fatal to a run.
    fn load(&self, path: &Path) -> SkafResult<DesiredStructure>;
}

/// Port for persisting the snapshot of what was materialized.
///
/// Implemented by:
/// - `skaf_adapters::JsonSnapshotStore`
#[cfg_attr(test, mockall::automock)]
pub trait SnapshotStore: Send + Sync {
    /// Load the snapshot stored next to `base_dir`. `Ok(None)` when there is none yet.
    fn load(&self, base_dir: &Path) -> SkafResult<Option<StructureSnapshot>>;

    /// Replace the stored snapshot.
    fn save(&self, base_dir: &Path, snapshot: &StructureSnapshot) -> SkafResult<()>;

    /// Where the snapshot for `base_dir` lives.
    fn location(&self, base_dir: &Path) -> PathBuf;
}

/// Port for performing the filesystem and tool work of a build.
///
/// The returned snapshot lists, per entity, only the projects and test
/// projects created during this call. An empty list means nothing new.
///
/// Implemented by:
/// - `skaf_adapters::DotnetMaterializer`
pub trait Materializer: Send + Sync {
    fn materialize(
        &self,
        desired: &DesiredStructure,
        previous: Option<&StructureSnapshot>,
        layout: &Layout,
    ) -> SkafResult<StructureSnapshot>;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `skaf_adapters::filesystem::LocalFilesystem` (production)
/// - `skaf_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SkafResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> SkafResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> SkafResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> SkafResult<()>;
}

/// An external command to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// What a finished command produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok() -> Self {
        Self {
            success: true,
            code: Some(0),
            ..Self::default()
        }
    }
}

/// Port for running external tools.
///
/// Implemented by:
/// - `skaf_adapters::process::ProcessRunner` (production)
/// - `skaf_adapters::process::RecordingRunner` (testing)
pub trait CommandRunner: Send + Sync {
    /// Run to completion. `Err` only when the command could not be started;
    /// a non-zero exit is reported through `CommandOutput::success`.
    fn run(&self, command: &CommandSpec) -> SkafResult<CommandOutput>;
}
