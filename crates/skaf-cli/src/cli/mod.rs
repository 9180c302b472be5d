//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "skaf",
    bin_name = "skaf",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Declarative multi-project scaffolding",
    long_about = "Skaf builds services, components and web apps from a \
                  structure.yaml file and remembers what it generated, so \
                  later runs only add what is new and remove what was dropped.",
    after_help = "EXAMPLES:\n\
        \x20 skaf init\n\
        \x20 skaf validate\n\
        \x20 skaf build --dry-run\n\
        \x20 skaf build --file ./repo/structure.yaml --yes\n\
        \x20 skaf completions bash > /usr/share/bash-completion/completions/skaf",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Preview, confirm and apply the structure.
    #[command(
        visible_alias = "b",
        about = "Generate folder structure and project scaffolding from YAML",
        after_help = "EXAMPLES:\n\
            \x20 skaf build                       # ./structure.yaml\n\
            \x20 skaf build --dry-run             # preview only\n\
            \x20 skaf build -f repo/structure.yaml -y"
    )]
    Build(BuildArgs),

    /// Check a structure file without touching the disk.
    #[command(
        about = "Validate YAML structure and dependencies",
        after_help = "EXAMPLES:\n\
            \x20 skaf validate\n\
            \x20 skaf validate --file repo/structure.yaml"
    )]
    Validate(ValidateArgs),

    /// Write an example structure file.
    #[command(
        about = "Create an example structure.yaml",
        after_help = "EXAMPLES:\n\
            \x20 skaf init                 # current directory\n\
            \x20 skaf init --path ./repo\n\
            \x20 skaf init --force         # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 skaf completions bash > ~/.local/share/bash-completion/completions/skaf\n\
            \x20 skaf completions zsh  > ~/.zfunc/_skaf\n\
            \x20 skaf completions fish > ~/.config/fish/completions/skaf.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Skaf configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 skaf config get tools.dotnet\n\
            \x20 skaf config list\n\
            \x20 skaf config path"
    )]
    Config(ConfigCommands),
}

// ── build ─────────────────────────────────────────────────────────────────────

/// Arguments for `skaf build`.
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Structure file. Defaults to `structure_file` from the configuration.
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help = "Path to structure YAML file"
    )]
    pub file: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and generate immediately"
    )]
    pub yes: bool,

    /// Show the preview and stop.
    #[arg(
        long = "dry-run",
        conflicts_with = "yes",
        help = "Show what would change without changing anything"
    )]
    pub dry_run: bool,
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `skaf validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Structure file. Defaults to `structure_file` from the configuration.
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help = "Path to structure YAML file"
    )]
    pub file: Option<PathBuf>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `skaf init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory to write `structure.yaml` into.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        help = "Output directory for structure.yaml (default: current directory)"
    )]
    pub path: Option<PathBuf>,

    /// Overwrite an existing structure file.
    #[arg(long = "force", help = "Overwrite an existing structure.yaml")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `skaf completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `skaf config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `tools.dotnet`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_build_command() {
        let cli = Cli::parse_from(["skaf", "build", "--file", "repo/structure.yaml", "-y"]);
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.file, Some(PathBuf::from("repo/structure.yaml")));
                assert!(args.yes);
                assert!(!args.dry_run);
            }
            other => panic!("expected Build command, got {other:?}"),
        }
    }

    #[test]
    fn build_alias() {
        let cli = Cli::parse_from(["skaf", "b", "--dry-run"]);
        assert!(matches!(cli.command, Commands::Build(BuildArgs { dry_run: true, .. })));
    }

    #[test]
    fn dry_run_and_yes_conflict() {
        let result = Cli::try_parse_from(["skaf", "build", "--dry-run", "--yes"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_init_with_path() {
        let cli = Cli::parse_from(["skaf", "init", "--path", "/tmp/repo", "--force"]);
        match cli.command {
            Commands::Init(args) => {
                assert_eq!(args.path, Some(PathBuf::from("/tmp/repo")));
                assert!(args.force);
            }
            other => panic!("expected Init command, got {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["skaf", "validate", "-vv", "--no-color"]);
        assert_eq!(cli.global.verbose, 2);
        assert!(cli.global.no_color);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["skaf", "--quiet", "--verbose", "validate"]);
        assert!(result.is_err());
    }
}
