//! `skaf validate`: parse and check a structure file. No diffing, no I/O
//! beyond reading the file.

use serde_json::json;
use tracing::instrument;

use crate::{
    cli::ValidateArgs,
    commands::{build_service, structure_path},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: ValidateArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let structure = structure_path(args.file, config);

    output.info(&format!("Validating {}...", structure.display()))?;
    let report = build_service(config).validate(&structure)?;
    let issues: Vec<String> = report.issues().iter().map(ToString::to_string).collect();

    if output.is_json() {
        output.json(&json!({
            "structure": structure.display().to_string(),
            "valid": report.is_valid(),
            "issues": issues,
        }))?;
    }

    if !report.is_valid() {
        return Err(CliError::InvalidStructure { issues });
    }

    output.success("Structure is valid.")?;
    Ok(())
}
