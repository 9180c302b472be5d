//! The persisted record of what a run actually materialized.
//!
//! Field names serialize in PascalCase (`Services`, `Name`, `TestProjects`)
//! to stay compatible with existing `skaf.json` files. Case-insensitive
//! reading is the snapshot store's job, not this module's.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Category, EntityKey};

/// One materialized service, component, or web app.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GeneratedEntity {
    pub name: String,
    pub directory: PathBuf,
    /// Source projects created for this entity.
    pub projects: Vec<String>,
    /// Test projects created for this entity (`{Project}.UnitTests`).
    pub test_projects: Vec<String>,
}

impl GeneratedEntity {
    pub fn new(name: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            directory: directory.into(),
            projects: Vec::new(),
            test_projects: Vec::new(),
        }
    }

    pub fn with_projects<I, S>(mut self, projects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projects = projects.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_test_projects<I, S>(mut self, test_projects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.test_projects = test_projects.into_iter().map(Into::into).collect();
        self
    }

    pub fn key(&self) -> EntityKey {
        EntityKey::new(self.name.clone(), self.directory.clone())
    }
}

/// Three ordered collections of generated entities. The unit of persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct StructureSnapshot {
    pub services: Vec<GeneratedEntity>,
    pub components: Vec<GeneratedEntity>,
    pub web_apps: Vec<GeneratedEntity>,
}

impl StructureSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entities(&self, category: Category) -> &[GeneratedEntity] {
        match category {
            Category::Service => &self.services,
            Category::Component => &self.components,
            Category::WebApp => &self.web_apps,
        }
    }

    pub fn entities_mut(&mut self, category: Category) -> &mut Vec<GeneratedEntity> {
        match category {
            Category::Service => &mut self.services,
            Category::Component => &mut self.components,
            Category::WebApp => &mut self.web_apps,
        }
    }

    /// Find an entity by its full key.
    pub fn find(&self, category: Category, key: &EntityKey) -> Option<&GeneratedEntity> {
        self.entities(category)
            .iter()
            .find(|e| e.name == key.name && e.directory == key.directory)
    }

    pub fn with_entity(mut self, category: Category, entity: GeneratedEntity) -> Self {
        self.entities_mut(category).push(entity);
        self
    }

    pub fn entity_count(&self) -> usize {
        self.services.len() + self.components.len() + self.web_apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_count() == 0
    }
}
