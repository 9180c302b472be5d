//! Core domain layer for Skaf.
//!
//! This module contains pure structure logic with no I/O. Loading, persisting
//! and materializing are handled via ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, process, or network calls
//! - **No logging**: Observability belongs to the application layer
//! - **Immutable inputs**: Rendering and reconciliation borrow or consume
//!   their inputs and return new values
//!
pub mod diff;
pub mod entities;
pub mod error;
pub mod reconcile;
pub mod validation;
pub mod value_objects;

pub use diff::{Change, DiffLine, DiffNode, DiffSection, DiffSummary, StructureDiff, render};
pub use entities::{
    DesiredStructure, DevOpsSpec, GeneratedEntity, PackageSpec, ProjectSpec, SolutionSpec,
    SourceSpec, StructureSnapshot, TestSpec, WebAppSpec, test_project_name,
};
pub use error::{DomainError, ErrorCategory};
pub use reconcile::{ReconciliationResult, reconcile};
pub use validation::{StructureValidator, ValidationIssue, ValidationReport};
pub use value_objects::{Category, EntityKey, EntityLabel, Layout};
