//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "preview a build" or "apply a build".

pub mod build_service;

pub use build_service::{BuildPlan, BuildService};
