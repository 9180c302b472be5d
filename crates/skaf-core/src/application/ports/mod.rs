//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `skaf-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `StructureSource`: Desired structure loading
//!   - `SnapshotStore`: Snapshot persistence
//!   - `Materializer`: Turning a desired structure into files on disk
//!   - `Filesystem`, `CommandRunner`: Used by materializer adapters
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by `BuildService`)

pub mod output;

pub use output::{
    CommandOutput, CommandRunner, CommandSpec, Filesystem, Materializer, SnapshotStore,
    StructureSource,
};

#[cfg(test)]
pub use output::{MockSnapshotStore, MockStructureSource};
