//! `skaf init`: write the example `structure.yaml`.

use std::path::PathBuf;

use tracing::{info, instrument};

use skaf_adapters::{DEFAULT_STRUCTURE_FILE, EXAMPLE_STRUCTURE};

use crate::{
    cli::InitArgs,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Create the example structure file in `--path` (default: current directory).
#[instrument(skip_all)]
pub fn execute(args: InitArgs, output: &OutputManager) -> CliResult<()> {
    let dir = args.path.unwrap_or_else(|| PathBuf::from("."));
    let path = dir.join(DEFAULT_STRUCTURE_FILE);

    // Bail early if the file already exists and --force was not given.
    if path.exists() && !args.force {
        return Err(CliError::StructureExists { path });
    }

    std::fs::create_dir_all(&dir)
        .with_cli_context(|| format!("Failed to create directory '{}'", dir.display()))?;
    std::fs::write(&path, EXAMPLE_STRUCTURE)
        .with_cli_context(|| format!("Failed to write '{}'", path.display()))?;

    info!(path = %path.display(), "Example structure written");
    output.success(&format!("{DEFAULT_STRUCTURE_FILE} created at: {}", path.display()))?;
    output.print("")?;
    output.print("Next steps:")?;
    output.print("  skaf validate")?;
    output.print("  skaf build --dry-run")?;

    Ok(())
}
