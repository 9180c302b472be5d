//! Output management and formatting.

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use skaf_core::domain::diff::NO_CHANGES_NOTICE;
use skaf_core::domain::{Change, DiffLine, EntityLabel, ReconciliationResult, StructureDiff};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    ///
    /// `--output-format` wins over `output.format` unless it was left on `auto`.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => OutputFormat::from_config(&config.output.format),
            explicit => explicit,
        };
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }
    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet and JSON mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue(), msg)
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// The structure preview, one coloured line per node.
    pub fn diff(&self, diff: &StructureDiff) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        for line in diff.lines() {
            self.term.write_line(&self.style_line(&line))?;
        }
        if diff.shows_no_changes_notice() {
            self.term.write_line("")?;
            self.info(NO_CHANGES_NOTICE)?;
        }
        Ok(())
    }

    /// Entity labels grouped as Added / Removed / Unchanged.
    pub fn reconciliation(&self, outcome: &ReconciliationResult) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        self.label_group("Added", &outcome.added, Change::Added)?;
        self.label_group("Removed", &outcome.removed, Change::Removed)?;
        self.label_group("Unchanged", &outcome.unchanged, Change::Unchanged)
    }

    /// Machine-readable output. Printed even in quiet mode.
    pub fn json(&self, value: &serde_json::Value) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    /// Spinner on stderr while a long step runs. Hidden when it would only
    /// add noise (quiet, JSON, or not a terminal).
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.silent() || !io::stderr().is_terminal() {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(msg.to_owned());
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` when output should be a single JSON document.
    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    /// Human-oriented output is off in quiet mode and when emitting JSON.
    fn silent(&self) -> bool {
        self.quiet || self.is_json()
    }

    fn style_line(&self, line: &DiffLine) -> String {
        if self.no_color {
            return line.text.clone();
        }
        if line.header {
            return line.text.bold().to_string();
        }
        match line.change {
            Change::Added => line.text.green().to_string(),
            Change::Removed => line.text.red().to_string(),
            Change::Unchanged => line.text.clone(),
        }
    }

    fn label_group(&self, title: &str, labels: &[EntityLabel], change: Change) -> io::Result<()> {
        if labels.is_empty() {
            return Ok(());
        }
        self.header(&format!("{title}:"))?;
        for label in labels {
            let text = format!("  {}{label}", change.marker());
            let line = match (self.no_color, change) {
                (false, Change::Added) => text.green().to_string(),
                (false, Change::Removed) => text.red().to_string(),
                _ => text,
            };
            self.term.write_line(&line)?;
        }
        Ok(())
    }
}

/// Labels as strings, for JSON output.
pub fn label_strings(labels: &[EntityLabel]) -> Vec<String> {
    labels.iter().map(ToString::to_string).collect()
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::AppConfig;

    fn make_manager(quiet: bool, no_color: bool, format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format: format,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    fn line(text: &str, change: Change) -> DiffLine {
        DiffLine {
            text: text.into(),
            change,
            header: false,
        }
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true, OutputFormat::Plain);
        assert!(out.print("hello").is_ok());
    }

    #[test]
    fn plain_format_disables_color() {
        let out = make_manager(false, false, OutputFormat::Plain);
        assert!(out.no_color);
        assert_eq!(out.style_line(&line("└── [+] Api/", Change::Added)), "└── [+] Api/");
    }

    #[test]
    fn human_format_colours_changes() {
        let out = make_manager(false, false, OutputFormat::Human);
        assert!(!out.no_color);

        let added = out.style_line(&line("[+] Api/", Change::Added));
        assert!(added.contains("\u{1b}["));
        assert!(added.contains("[+] Api/"));

        let unchanged = out.style_line(&line("Domain/", Change::Unchanged));
        assert_eq!(unchanged, "Domain/");
    }

    #[test]
    fn no_color_flag_wins_over_human() {
        let out = make_manager(false, true, OutputFormat::Human);
        assert!(out.no_color);
    }

    #[test]
    fn config_format_applies_when_flag_is_auto() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: OutputFormat::Auto,
        };
        let mut config = AppConfig::default();
        config.output.format = "json".into();

        assert!(OutputManager::new(&args, &config).is_json());
    }

    #[test]
    fn quiet_spinner_is_hidden() {
        let out = make_manager(true, true, OutputFormat::Plain);
        assert!(out.spinner("working").is_hidden());
    }
}
