//! Implementation of the `skaf build` command.
//!
//! Preview first, then confirm, then materialize. Nothing on disk changes
//! before the user has seen the diff and answered the prompt.

use std::io::{self, Write};
use std::path::Path;

use serde_json::json;
use tracing::{info, instrument};

use skaf_core::application::{BuildPlan, BuildService};
use skaf_core::domain::ReconciliationResult;

use crate::{
    cli::BuildArgs,
    commands::{build_service, structure_path},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::{OutputManager, label_strings},
};

const PROMPT: &str = "Proceed with generation?";

/// Execute the `skaf build` command.
///
/// Dispatch sequence:
/// 1. Load, validate and diff (fatal on input errors)
/// 2. Show the preview
/// 3. Stop on `--dry-run`, otherwise confirm unless `--yes`
/// 4. Materialize, reconcile and persist the snapshot
/// 5. Report Added / Removed / Unchanged entities
#[instrument(skip_all)]
pub fn execute(args: BuildArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let structure = structure_path(args.file, config);
    let service = build_service(config);

    output.info(&format!("Parsing {}...", structure.display()))?;
    let plan = service.plan(&structure)?;

    for warning in plan.warnings() {
        output.warning(warning)?;
    }
    output.header("Generated File Structure Preview:")?;
    output.diff(plan.diff())?;
    output.print("")?;

    if args.dry_run {
        if output.is_json() {
            output.json(&plan_json(&plan, &service, &structure))?;
        } else {
            output.info("Dry run: nothing was changed.")?;
        }
        return Ok(());
    }

    if !args.yes && !confirm(PROMPT)? {
        return Err(CliError::Cancelled);
    }

    info!(structure = %structure.display(), "Build confirmed");
    let plan_summary = output.is_json().then(|| plan_json(&plan, &service, &structure));

    let spinner = output.spinner("Generating...");
    let outcome = service.apply(plan);
    spinner.finish_and_clear();
    let outcome = outcome?;

    if let Some(mut summary) = plan_summary {
        summary["result"] = result_json(&outcome);
        return Ok(output.json(&summary)?);
    }

    output.reconciliation(&outcome)?;
    output.success(&format!(
        "Build completed. Snapshot saved to {}",
        service.snapshot_location(&structure).display()
    ))?;
    Ok(())
}

// ── JSON ──────────────────────────────────────────────────────────────────────

fn plan_json(plan: &BuildPlan, service: &BuildService, structure: &Path) -> serde_json::Value {
    let diff = plan.diff();
    let lines: Vec<String> = diff.lines().into_iter().map(|l| l.text).collect();
    json!({
        "structure": structure.display().to_string(),
        "snapshot": service.snapshot_location(structure).display().to_string(),
        "has_changes": diff.has_changes(),
        "summary": diff.summary(),
        "diff": lines,
        "warnings": plan.warnings(),
    })
}

fn result_json(outcome: &ReconciliationResult) -> serde_json::Value {
    json!({
        "added": label_strings(&outcome.added),
        "removed": label_strings(&outcome.removed),
        "unchanged": label_strings(&outcome.unchanged),
    })
}

// ── Confirmation ──────────────────────────────────────────────────────────────

#[cfg(feature = "interactive")]
fn confirm(prompt: &str) -> CliResult<bool> {
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() {
        return confirm_from_stdin(prompt);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation".into(),
            source: io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm(prompt: &str) -> CliResult<bool> {
    confirm_from_stdin(prompt)
}

/// Plain `y/n` prompt on stderr, answer read from stdin.
fn confirm_from_stdin(prompt: &str) -> CliResult<bool> {
    let mut stderr = io::stderr();
    write!(stderr, "{prompt} (y/n): ")
        .and_then(|()| stderr.flush())
        .with_cli_context(|| "failed to write confirmation prompt")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .with_cli_context(|| "failed to read confirmation input")?;

    Ok(is_yes(&input))
}

fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
