//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by reference.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `SKAF_STRUCTURE_FILE`, `SKAF_TOOLS__DOTNET`, ...
//!    (`__` separates nested keys; `.env` is loaded first by `main`)
//! 3. Config file: `--config <FILE>` (must exist) or the platform config dir
//!    (optional)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use skaf_adapters::{DEFAULT_SNAPSHOT_FILE, DEFAULT_STRUCTURE_FILE, ToolPaths};

const ENV_PREFIX: &str = "SKAF";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Structure file used when `--file` is not given.
    pub structure_file: PathBuf,
    /// Snapshot file name, written next to the structure file.
    pub snapshot_file: String,
    /// Output settings.
    pub output: OutputConfig,
    /// External tools.
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub dotnet: String,
    pub shell: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            structure_file: PathBuf::from(DEFAULT_STRUCTURE_FILE),
            snapshot_file: DEFAULT_SNAPSHOT_FILE.into(),
            output: OutputConfig::default(),
            tools: ToolsConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        let tools = ToolPaths::default();
        Self {
            dotnet: tools.dotnet,
            shell: tools.shell,
        }
    }
}

impl From<&ToolsConfig> for ToolPaths {
    fn from(tools: &ToolsConfig) -> Self {
        Self {
            dotnet: tools.dotnet.clone(),
            shell: tools.shell.clone(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then `SKAF_*`
    /// environment variables.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required, environment())
    }

    fn load_from(path: &Path, required: bool, env: Environment) -> anyhow::Result<Self> {
        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(env.try_parsing(true))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.skaf.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "skaf", "skaf")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".skaf.toml"))
    }

    /// Look up a dotted key such as `tools.dotnet`.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let value = serde_json::to_value(self).ok()?;
        let pointer = format!("/{}", key.replace('.', "/"));
        value.pointer(&pointer).cloned()
    }
}

/// `SKAF_` prefix, `__` between nested keys.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use tempfile::TempDir;

    fn no_env() -> Environment {
        environment().source(Some(HashMap::new()))
    }

    #[test]
    fn defaults_match_adapters() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.structure_file, PathBuf::from("structure.yaml"));
        assert_eq!(cfg.snapshot_file, "skaf.json");
        assert_eq!(cfg.tools.dotnet, "dotnet");
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn missing_optional_file_returns_defaults() {
        let temp = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(&temp.path().join("absent.toml"), false, no_env()).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn missing_required_file_is_error() {
        let temp = TempDir::new().unwrap();
        assert!(AppConfig::load_from(&temp.path().join("absent.toml"), true, no_env()).is_err());
    }

    #[test]
    fn file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "snapshot_file = \"state.json\"\n\n[tools]\ndotnet = \"/usr/share/dotnet/dotnet\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path, true, no_env()).unwrap();

        assert_eq!(cfg.snapshot_file, "state.json");
        assert_eq!(cfg.tools.dotnet, "/usr/share/dotnet/dotnet");
        assert_eq!(cfg.tools.shell, "/bin/bash");
    }

    #[test]
    fn environment_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let env = environment().source(Some(HashMap::from([
            ("SKAF_STRUCTURE_FILE".to_string(), "repo/layout.yaml".to_string()),
            ("SKAF_OUTPUT__NO_COLOR".to_string(), "true".to_string()),
        ])));

        let cfg = AppConfig::load_from(&temp.path().join("absent.toml"), false, env).unwrap();

        assert_eq!(cfg.structure_file, PathBuf::from("repo/layout.yaml"));
        assert!(cfg.output.no_color);
    }

    #[test]
    fn dotted_lookup() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("tools.shell"), Some(serde_json::json!("/bin/bash")));
        assert_eq!(cfg.get("output.no_color"), Some(serde_json::json!(false)));
        assert_eq!(cfg.get("does.not.exist"), None);
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
