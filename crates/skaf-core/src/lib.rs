//! Skaf Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Skaf
//! multi-project scaffolding tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            skaf-cli (CLI)               │
//! │     (build / validate / init flows)     │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │              (BuildService)             │
//! │    plan (preview) → apply (persist)     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │ (StructureSource, SnapshotStore,        │
//! │  Materializer, Filesystem, Commands)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      skaf-adapters (Infrastructure)     │
//! │ (YAML, JSON store, dotnet materializer) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (DesiredStructure, StructureSnapshot,   │
//! │  diff renderer, reconciler, validator)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use skaf_core::application::BuildService;
//!
//! // Adapters come from `skaf-adapters`.
//! let service = BuildService::new(source, store, materializer);
//!
//! // 1. Preview: nothing on disk changes.
//! let plan = service.plan("structure.yaml").unwrap();
//! println!("{}", plan.diff().to_text());
//!
//! // 2. Apply: materialize, reconcile, persist.
//! let outcome = service.apply(plan).unwrap();
//! ```

// Pure structure model, diff and reconciliation
pub mod domain;

// Orchestration logic and ports
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BuildPlan, BuildService,
        ports::{CommandRunner, Filesystem, Materializer, SnapshotStore, StructureSource},
    };
    pub use crate::domain::{
        Category, DesiredStructure, EntityLabel, GeneratedEntity, Layout, ReconciliationResult,
        StructureDiff, StructureSnapshot, StructureValidator, ValidationReport,
    };
    pub use crate::error::{SkafError, SkafResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
