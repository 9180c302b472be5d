//! Command runner adapters.

use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex};

use tracing::{debug, instrument};

use skaf_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner, CommandSpec},
    },
    error::SkafResult,
};

/// Runs commands as child processes.
///
/// Stdin is closed so tools that prompt (npm, vite) fail fast instead of
/// hanging the build.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    #[instrument(skip_all, fields(command = %command))]
    fn run(&self, command: &CommandSpec) -> SkafResult<CommandOutput> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &command.current_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|e| ApplicationError::CommandFailed {
            command: command.to_string(),
            reason: format!("failed to start: {e}"),
        })?;

        let result = CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(success = result.success, code = ?result.code, "Command finished");
        Ok(result)
    }
}

type Responder = dyn Fn(&CommandSpec) -> CommandOutput + Send + Sync;

/// Test double that records every command instead of running it.
///
/// By default every command succeeds. A responder can simulate failures or
/// side effects (e.g. writing the `.csproj` a `dotnet new` would create).
#[derive(Clone, Default)]
pub struct RecordingRunner {
    calls: Arc<Mutex<Vec<CommandSpec>>>,
    responder: Option<Arc<Responder>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&CommandSpec) -> CommandOutput + Send + Sync + 'static,
    {
        Self {
            calls: Arc::default(),
            responder: Some(Arc::new(responder)),
        }
    }

    /// Every command run so far, in order.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Rendered command lines, handy for assertions.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }
}

impl std::fmt::Debug for RecordingRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingRunner")
            .field("calls", &self.calls())
            .finish_non_exhaustive()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &CommandSpec) -> SkafResult<CommandOutput> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(command.clone());
        }
        Ok(match &self.responder {
            Some(responder) => responder(command),
            None => CommandOutput::ok(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn captures_output_and_status() {
        let runner = ProcessRunner::new();

        let ok = runner
            .run(&CommandSpec::new("sh").arg("-c").arg("echo hello"))
            .unwrap();
        assert!(ok.success);
        assert_eq!(ok.stdout.trim(), "hello");

        let failed = runner
            .run(&CommandSpec::new("sh").arg("-c").arg("echo oops >&2; exit 3"))
            .unwrap();
        assert!(!failed.success);
        assert_eq!(failed.code, Some(3));
        assert_eq!(failed.stderr.trim(), "oops");
    }

    #[cfg(unix)]
    #[test]
    fn runs_in_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = ProcessRunner::new()
            .run(&CommandSpec::new("pwd").current_dir(dir.path()))
            .unwrap();
        let reported = std::fs::canonicalize(out.stdout.trim()).unwrap();
        assert_eq!(reported, std::fs::canonicalize(dir.path()).unwrap());
    }

    #[test]
    fn missing_program_is_an_error() {
        let err = ProcessRunner::new()
            .run(&CommandSpec::new("skaf-definitely-not-installed"))
            .unwrap_err();
        assert!(err.to_string().contains("failed to start"));
    }

    #[test]
    fn recording_runner_records_and_responds() {
        let runner = RecordingRunner::with_responder(|cmd| CommandOutput {
            success: cmd.program != "fail",
            ..CommandOutput::default()
        });

        assert!(runner.run(&CommandSpec::new("dotnet").arg("--version")).unwrap().success);
        assert!(!runner.run(&CommandSpec::new("fail")).unwrap().success);
        assert_eq!(runner.command_lines(), vec!["dotnet --version", "fail"]);
    }
}
