//! Build Service - main application orchestrator.
//!
//! A build runs in two steps so that nothing on disk changes before the user
//! has seen the preview:
//! 1. `plan`: load + validate the desired structure, load the prior snapshot,
//!    render the diff
//! 2. `apply`: materialize, reconcile against the plan's prior snapshot,
//!    persist the reconciled snapshot
//!
//! `apply` only accepts a `BuildPlan`, so the preview always comes first.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::{Materializer, SnapshotStore, StructureSource},
    domain::{
        DesiredStructure, Layout, ReconciliationResult, StructureDiff, StructureSnapshot,
        StructureValidator, ValidationReport, diff, reconcile,
    },
    error::{SkafError, SkafResult},
};

/// Everything computed before any mutation: the preview of a build.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    structure_path: PathBuf,
    layout: Layout,
    desired: DesiredStructure,
    previous: Option<StructureSnapshot>,
    diff: StructureDiff,
    warnings: Vec<String>,
}

impl BuildPlan {
    pub fn structure_path(&self) -> &Path {
        &self.structure_path
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn desired(&self) -> &DesiredStructure {
        &self.desired
    }

    pub fn previous(&self) -> Option<&StructureSnapshot> {
        self.previous.as_ref()
    }

    pub fn diff(&self) -> &StructureDiff {
        &self.diff
    }

    /// Non-fatal problems found while planning (e.g. an unreadable snapshot).
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn has_changes(&self) -> bool {
        self.diff.has_changes()
    }
}

/// Orchestrates load → diff → materialize → reconcile → persist.
pub struct BuildService {
    source: Box<dyn StructureSource>,
    store: Box<dyn SnapshotStore>,
    materializer: Box<dyn Materializer>,
}

impl BuildService {
    /// Create a new build service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use skaf_core::application::BuildService;
    ///
    /// let service = BuildService::new(
    ///     source,       // impl StructureSource
    ///     store,        // impl SnapshotStore
    ///     materializer, // impl Materializer
    /// );
    /// ```
    pub fn new(
        source: Box<dyn StructureSource>,
        store: Box<dyn SnapshotStore>,
        materializer: Box<dyn Materializer>,
    ) -> Self {
        Self {
            source,
            store,
            materializer,
        }
    }

    /// Build the preview. Fails only on input errors.
    #[instrument(skip_all, fields(structure = %structure_path.as_ref().display()))]
    pub fn plan(&self, structure_path: impl AsRef<Path>) -> SkafResult<BuildPlan> {
        let structure_path = structure_path.as_ref();

        let desired = self.load_valid(structure_path)?;
        let layout = Layout::new(base_dir_of(structure_path));

        let mut warnings = Vec::new();
        let previous = match self.store.load(layout.base_dir()) {
            Ok(previous) => previous,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable snapshot, using an empty baseline");
                warnings.push(format!(
                    "Could not read {}: {e}. Treating this run as a first build.",
                    self.store.location(layout.base_dir()).display()
                ));
                None
            }
        };
        debug!(
            previous_entities = previous.as_ref().map_or(0, StructureSnapshot::entity_count),
            "Prior snapshot loaded"
        );

        let diff = diff::render(&desired, previous.as_ref(), &layout);
        info!(summary = %diff.summary(), "Diff rendered");

        Ok(BuildPlan {
            structure_path: structure_path.to_path_buf(),
            layout,
            desired,
            previous,
            diff,
            warnings,
        })
    }

    /// Carry out a plan and persist the reconciled snapshot.
    #[instrument(skip_all, fields(base_dir = %plan.layout.base_dir().display()))]
    pub fn apply(&self, plan: BuildPlan) -> SkafResult<ReconciliationResult> {
        let BuildPlan {
            layout,
            desired,
            previous,
            ..
        } = plan;

        info!("Materializing structure");
        let result = self
            .materializer
            .materialize(&desired, previous.as_ref(), &layout)?;

        let outcome = reconcile(previous.as_ref(), result).map_err(SkafError::Domain)?;
        info!(
            added = outcome.added.len(),
            removed = outcome.removed.len(),
            unchanged = outcome.unchanged.len(),
            "Reconciled"
        );

        self.store.save(layout.base_dir(), &outcome.snapshot)?;
        info!(
            path = %self.store.location(layout.base_dir()).display(),
            "Snapshot saved"
        );

        Ok(outcome)
    }

    /// Parse and validate without diffing. Parse failures are errors, issues are not.
    #[instrument(skip_all, fields(structure = %structure_path.as_ref().display()))]
    pub fn validate(&self, structure_path: impl AsRef<Path>) -> SkafResult<ValidationReport> {
        let desired = self.source.load(structure_path.as_ref())?;
        let report = StructureValidator::validate(&desired);
        debug!(issues = report.issues().len(), "Structure validated");
        Ok(report)
    }

    /// Where the snapshot for a structure file lives.
    pub fn snapshot_location(&self, structure_path: impl AsRef<Path>) -> PathBuf {
        self.store.location(&base_dir_of(structure_path.as_ref()))
    }

    fn load_valid(&self, structure_path: &Path) -> SkafResult<DesiredStructure> {
        let desired = self.source.load(structure_path)?;
        StructureValidator::validate(&desired)
            .into_result()
            .map_err(SkafError::Domain)?;
        Ok(desired)
    }
}

/// Entities are laid out next to the structure file.
///
/// The directory is resolved to one absolute spelling so that
/// `structure.yaml`, `./structure.yaml` and `/repo/structure.yaml` key the
/// same entities identically. Symlinks and `..` are resolved when the
/// directory exists.
fn base_dir_of(structure_path: &Path) -> PathBuf {
    let parent = match structure_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::canonicalize(parent)
        .or_else(|_| std::path::absolute(parent))
        .unwrap_or_else(|_| parent.to_path_buf())
}
