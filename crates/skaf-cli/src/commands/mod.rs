//! Command handlers. Each one translates arguments into calls on the core
//! services and renders the result. No business logic lives here.

use std::path::PathBuf;

use skaf_adapters::{
    DotnetMaterializer, JsonSnapshotStore, LocalFilesystem, ProcessRunner, ToolPaths,
    YamlStructureSource,
};
use skaf_core::application::BuildService;

use crate::config::AppConfig;

pub mod build;
pub mod completions;
pub mod config;
pub mod init;
pub mod validate;

/// Wire the production adapters into a [`BuildService`].
pub(crate) fn build_service(config: &AppConfig) -> BuildService {
    let materializer = DotnetMaterializer::with_tools(
        LocalFilesystem::new(),
        ProcessRunner::new(),
        ToolPaths::from(&config.tools),
    );
    BuildService::new(
        Box::new(YamlStructureSource::new()),
        Box::new(JsonSnapshotStore::new(config.snapshot_file.clone())),
        Box::new(materializer),
    )
}

/// `--file`, falling back to `structure_file` from the configuration.
pub(crate) fn structure_path(file: Option<PathBuf>, config: &AppConfig) -> PathBuf {
    file.unwrap_or_else(|| config.structure_file.clone())
}
