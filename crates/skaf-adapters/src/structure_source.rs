//! YAML structure document loader.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, instrument};

use skaf_core::{
    application::{ApplicationError, ports::StructureSource},
    domain::DesiredStructure,
    error::SkafResult,
};

/// Parses `structure.yaml` (camelCase keys, unknown keys ignored).
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlStructureSource;

impl YamlStructureSource {
    pub fn new() -> Self {
        Self
    }

    /// Parse a document from memory. `path` is only used in error messages.
    pub fn parse(&self, yaml: &str, path: &Path) -> SkafResult<DesiredStructure> {
        // An empty document is an empty structure, not an error.
        if yaml.trim().is_empty() {
            return Ok(DesiredStructure::default());
        }

        serde_yaml::from_str::<Option<DesiredStructure>>(yaml)
            .map(Option::unwrap_or_default)
            .map_err(|e| {
                ApplicationError::StructureParse {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
                .into()
            })
    }
}

impl StructureSource for YamlStructureSource {
    #[instrument(skip(self))]
    fn load(&self, path: &Path) -> SkafResult<DesiredStructure> {
        let yaml = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ApplicationError::StructureNotFound {
                path: path.to_path_buf(),
            },
            _ => ApplicationError::StructureParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        })?;

        let structure = self.parse(&yaml, path)?;
        debug!(
            services = structure.services.len(),
            components = structure.components.len(),
            web = structure.web.len(),
            "Structure parsed"
        );
        Ok(structure)
    }
}
