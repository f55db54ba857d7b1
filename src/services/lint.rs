//! Lint tool invocation

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

/// Runs a linter on a script and leaves its report in a file
pub trait LintTool {
    /// Lint `script`, writing the combined report to `results`.
    ///
    /// Findings are not an error; only failing to run the tool or to write
    /// the report is.
    fn run(&self, script: &Path, results: &Path) -> Result<()>;
}

/// Lint through a shellcheck-compatible command
#[derive(Debug, Clone)]
pub struct ShellcheckLint {
    command: String,
}

impl ShellcheckLint {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl LintTool for ShellcheckLint {
    fn run(&self, script: &Path, results: &Path) -> Result<()> {
        tracing::debug!(command = %self.command, script = %script.display(), "lint: running");
        let output = Command::new(&self.command)
            .arg(script)
            .output()
            .with_context(|| format!("failed to run {}", self.command))?;

        let mut report = output.stdout;
        report.extend_from_slice(&output.stderr);
        tracing::debug!(status = ?output.status, bytes = report.len(), "lint: finished");

        std::fs::write(results, report)
            .with_context(|| format!("failed to write {}", results.display()))
    }
}
