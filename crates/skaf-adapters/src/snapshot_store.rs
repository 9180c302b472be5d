//! JSON snapshot store.
//!
//! The snapshot lives in a single pretty-printed JSON file next to the
//! structure document. Field names are written in PascalCase and read
//! case-insensitively, so `"services"`, `"Services"` and `"SERVICES"` all load.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use skaf_core::{
    application::{ApplicationError, ports::SnapshotStore},
    domain::StructureSnapshot,
    error::SkafResult,
};

/// Default snapshot file name.
pub const DEFAULT_SNAPSHOT_FILE: &str = "skaf.json";

/// Canonical spelling of every field a snapshot can contain.
const CANONICAL_KEYS: &[&str] = &[
    "Services",
    "Components",
    "WebApps",
    "Name",
    "Directory",
    "Projects",
    "TestProjects",
];

/// Stores the snapshot as `<base_dir>/<file_name>`.
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    file_name: String,
}

impl JsonSnapshotStore {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

impl Default for JsonSnapshotStore {
    fn default() -> Self {
        Self::new(DEFAULT_SNAPSHOT_FILE)
    }
}

impl SnapshotStore for JsonSnapshotStore {
    #[instrument(skip(self), fields(file = %self.file_name))]
    fn load(&self, base_dir: &Path) -> SkafResult<Option<StructureSnapshot>> {
        let path = self.location(base_dir);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No snapshot yet");
                return Ok(None);
            }
            Err(e) => return Err(read_error(&path, e.to_string())),
        };

        let value: Value =
            serde_json::from_str(&raw).map_err(|e| read_error(&path, e.to_string()))?;
        let snapshot = serde_json::from_value(canonicalize_keys(value))
            .map_err(|e| read_error(&path, e.to_string()))?;

        Ok(Some(snapshot))
    }

    #[instrument(skip(self, snapshot), fields(file = %self.file_name))]
    fn save(&self, base_dir: &Path, snapshot: &StructureSnapshot) -> SkafResult<()> {
        let path = self.location(base_dir);
        let write_error = |reason: String| ApplicationError::SnapshotWrite {
            path: path.clone(),
            reason,
        };

        let mut contents =
            serde_json::to_vec_pretty(snapshot).map_err(|e| write_error(e.to_string()))?;
        contents.push(b'\n');

        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| write_error(e.to_string()))?;

        // Temp file in the same directory, synced, then renamed over the old
        // snapshot. A failure at any step leaves the previous file in place.
        let temp = NamedTempFile::new_in(dir)
            .map_err(|e| write_error(format!("creating temp file in {}: {e}", dir.display())))?;
        let mut file = temp.as_file();
        file.write_all(&contents)
            .map_err(|e| write_error(format!("writing temp file: {e}")))?;
        file.sync_all()
            .map_err(|e| write_error(format!("syncing temp file: {e}")))?;
        temp.persist(&path)
            .map_err(|e| write_error(format!("renaming temp file: {}", e.error)))?;

        debug!(path = %path.display(), entities = snapshot.entity_count(), "Snapshot written");
        Ok(())
    }

    fn location(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.file_name)
    }
}

fn read_error(path: &Path, reason: String) -> skaf_core::error::SkafError {
    ApplicationError::SnapshotRead {
        path: path.to_path_buf(),
        reason,
    }
    .into()
}

/// Rewrite object keys to their canonical spelling, ignoring case.
fn canonicalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (canonical_key(key), canonicalize_keys(value)))
                .collect::<Map<_, _>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize_keys).collect()),
        other => other,
    }
}

fn canonical_key(key: String) -> String {
    CANONICAL_KEYS
        .iter()
        .find(|canonical| canonical.eq_ignore_ascii_case(&key))
        .map_or(key, |canonical| (*canonical).to_string())
}
