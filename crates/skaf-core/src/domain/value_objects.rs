//! Domain value objects: Category, EntityKey, EntityLabel, Layout.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity of their
//! own. `EntityKey` is the single notion of "same entity" used by both the diff
//! renderer and the reconciler: the pair `(name, directory)`.
//!
//! # Adding a New Category
//!
//! 1. Add the enum variant here and extend `ALL`
//! 2. Add the `label` and `folder` arms
//! 3. Add the collection to `StructureSnapshot`

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ── Category ─────────────────────────────────────────────────────────────────

/// The kind of top-level generated entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Service,
    Component,
    WebApp,
}

impl Category {
    /// Every category, in rendering and reconciliation order.
    pub const ALL: [Self; 3] = [Self::Service, Self::Component, Self::WebApp];

    /// Prefix used in reconciliation labels (`Service:Api @ ...`).
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Service => "Service",
            Self::Component => "Component",
            Self::WebApp => "WebApp",
        }
    }

    /// Folder under the base directory where entities of this category live.
    pub const fn folder(&self) -> &'static str {
        match self {
            Self::Service => "Services",
            Self::Component => "Components",
            Self::WebApp => "Web",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── EntityKey ────────────────────────────────────────────────────────────────

/// Identity of a generated entity within one category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityKey {
    pub name: String,
    pub directory: PathBuf,
}

impl EntityKey {
    pub fn new(name: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            directory: directory.into(),
        }
    }
}

// ── EntityLabel ──────────────────────────────────────────────────────────────

/// Human-readable, category-qualified entity label.
///
/// Renders as `Service:Api @ /repo/Services/Api`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityLabel {
    pub category: Category,
    pub name: String,
    pub directory: PathBuf,
}

impl EntityLabel {
    pub fn new(category: Category, key: &EntityKey) -> Self {
        Self {
            category,
            name: key.name.clone(),
            directory: key.directory.clone(),
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} @ {}",
            self.category.label(),
            self.name,
            self.directory.display()
        )
    }
}

// ── Layout ───────────────────────────────────────────────────────────────────

/// Where entities are materialized relative to the structure file.
///
/// The renderer and the materializer both resolve directories through this
/// type, so a desired entity and its snapshot record always share a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    base_dir: PathBuf,
}

impl Layout {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// `base_dir/<folder>` for a category.
    pub fn category_root(&self, category: Category) -> PathBuf {
        self.base_dir.join(category.folder())
    }

    /// `base_dir/<folder>/<name>` for an entity.
    pub fn entity_dir(&self, category: Category, name: &str) -> PathBuf {
        self.category_root(category).join(name)
    }

    pub fn key(&self, category: Category, name: &str) -> EntityKey {
        EntityKey::new(name, self.entity_dir(category, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_order_is_services_components_web() {
        assert_eq!(
            Category::ALL,
            [Category::Service, Category::Component, Category::WebApp]
        );
    }

    #[test]
    fn label_display_is_category_qualified() {
        let label = EntityLabel::new(
            Category::Service,
            &EntityKey::new("Api", "/repo/Services/Api"),
        );
        assert_eq!(label.to_string(), "Service:Api @ /repo/Services/Api");
    }

    #[test]
    fn layout_resolves_entity_directories() {
        let layout = Layout::new("/repo");
        assert_eq!(
            layout.entity_dir(Category::WebApp, "Portal"),
            PathBuf::from("/repo/Web/Portal")
        );
        assert_eq!(
            layout.key(Category::Component, "Worker"),
            EntityKey::new("Worker", "/repo/Components/Worker")
        );
    }

    #[test]
    fn keys_compare_paths_by_component() {
        assert_eq!(
            EntityKey::new("Api", "/repo/Services/Api/"),
            EntityKey::new("Api", "/repo/Services/Api")
        );
    }
}
