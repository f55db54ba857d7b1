//! Terminal session recording

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;

/// Records the student editing their script
pub trait SessionRecorder {
    /// Run `editor script` under the recorder, saving the cast to `recording`.
    /// Blocks until the session ends; the caller owns the terminal state.
    fn record(&self, editor: &str, script: &Path, recording: &Path) -> Result<()>;
}

/// Record through asciinema
#[derive(Debug, Clone)]
pub struct AsciinemaRecorder {
    command: String,
}

impl AsciinemaRecorder {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl SessionRecorder for AsciinemaRecorder {
    fn record(&self, editor: &str, script: &Path, recording: &Path) -> Result<()> {
        let session = format!("{} {}", editor, script.display());
        tracing::info!(%session, recording = %recording.display(), "recorder: starting");

        let status = Command::new(&self.command)
            .args(["rec", "-q", "--stdin", "--overwrite", "--command"])
            .arg(&session)
            .arg(recording)
            .status()
            .with_context(|| format!("failed to run {}", self.command))?;

        if !status.success() {
            bail!("{} recording failed ({status})", self.command);
        }
        Ok(())
    }
}
