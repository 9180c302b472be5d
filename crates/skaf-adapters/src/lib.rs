//! Infrastructure adapters for Skaf.
//!
//! This crate implements the ports defined in `skaf-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod example;
pub mod filesystem;
pub mod materializer;
pub mod process;
pub mod snapshot_store;
pub mod structure_source;

// Re-export commonly used adapters
pub use example::{DEFAULT_STRUCTURE_FILE, EXAMPLE_STRUCTURE, example_structure};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use materializer::{DotnetMaterializer, ToolPaths};
pub use process::{ProcessRunner, RecordingRunner};
pub use snapshot_store::{DEFAULT_SNAPSHOT_FILE, JsonSnapshotStore};
pub use structure_source::YamlStructureSource;
