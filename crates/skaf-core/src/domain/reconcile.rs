//! Reconciler: merges the prior snapshot with what the materializer reported.
//!
//! The materializer only reports what it created during this run, so an entity
//! that already existed comes back with empty project lists. Reconciliation
//! restores those lists from the prior snapshot, classifies every entity at
//! entity granularity, and yields the snapshot to persist.
//!
//! Entities are keyed by `(name, directory)`. Duplicate keys in either input
//! are a contract violation by the collaborator that produced them and are
//! returned as [`DomainError::DuplicateEntity`].
//!
//! This module must not import `tracing`. The application layer logs the
//! outcome.

use std::collections::{HashMap, HashSet};

use crate::domain::entities::snapshot::{GeneratedEntity, StructureSnapshot};
use crate::domain::error::DomainError;
use crate::domain::value_objects::{Category, EntityKey, EntityLabel};

const PREVIOUS: &str = "previous snapshot";
const RESULT: &str = "materializer result";

/// Outcome of a reconciliation: the snapshot to persist plus entity labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationResult {
    pub snapshot: StructureSnapshot,
    pub added: Vec<EntityLabel>,
    pub removed: Vec<EntityLabel>,
    pub unchanged: Vec<EntityLabel>,
}

impl ReconciliationResult {
    /// Whether any entity was added or removed.
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}

/// Merge `previous` with `result`.
///
/// `previous == None` is the first run: everything in `result` is added.
pub fn reconcile(
    previous: Option<&StructureSnapshot>,
    result: StructureSnapshot,
) -> Result<ReconciliationResult, DomainError> {
    let empty = StructureSnapshot::default();
    let previous = previous.unwrap_or(&empty);

    let StructureSnapshot {
        services,
        components,
        web_apps,
    } = result;

    let mut outcome = ReconciliationResult::default();
    for (category, entities) in Category::ALL.into_iter().zip([services, components, web_apps]) {
        reconcile_category(category, previous.entities(category), entities, &mut outcome)?;
    }
    Ok(outcome)
}

fn reconcile_category(
    category: Category,
    previous: &[GeneratedEntity],
    result: Vec<GeneratedEntity>,
    outcome: &mut ReconciliationResult,
) -> Result<(), DomainError> {
    let mut known: HashMap<EntityKey, &GeneratedEntity> = HashMap::with_capacity(previous.len());
    for entity in previous {
        if known.insert(entity.key(), entity).is_some() {
            return Err(duplicate(category, entity, PREVIOUS));
        }
    }

    let mut seen = HashSet::with_capacity(result.len());
    let merged = outcome.snapshot.entities_mut(category);

    for mut entity in result {
        let key = entity.key();
        if seen.contains(&key) {
            return Err(duplicate(category, &entity, RESULT));
        }

        let label = EntityLabel::new(category, &key);
        match known.get(&key) {
            Some(prior) => {
                if entity.projects.is_empty() {
                    entity.projects = prior.projects.clone();
                }
                if entity.test_projects.is_empty() {
                    entity.test_projects = prior.test_projects.clone();
                }
                outcome.unchanged.push(label);
            }
            None => outcome.added.push(label),
        }

        merged.push(entity);
        seen.insert(key);
    }

    outcome.removed.extend(
        previous
            .iter()
            .map(GeneratedEntity::key)
            .filter(|key| !seen.contains(key))
            .map(|key| EntityLabel::new(category, &key)),
    );

    Ok(())
}

fn duplicate(category: Category, entity: &GeneratedEntity, source_name: &'static str) -> DomainError {
    DomainError::DuplicateEntity {
        category: category.label(),
        name: entity.name.clone(),
        directory: entity.directory.display().to_string(),
        source_name,
    }
}
