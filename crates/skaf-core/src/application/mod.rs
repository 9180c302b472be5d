//! Application layer for Skaf.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (`BuildService`)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! structure logic itself. Diffing, reconciliation and validation live in
//! `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{BuildPlan, BuildService};

// Re-export port traits (for adapter implementation)
pub use ports::{
    CommandOutput, CommandRunner, CommandSpec, Filesystem, Materializer, SnapshotStore,
    StructureSource,
};

pub use error::ApplicationError;
