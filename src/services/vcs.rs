//! Version control backend

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::process::Command;

/// The version control operations the lab workflow needs
pub trait VersionControl {
    fn add_all(&self) -> Result<()>;
    fn commit(&self, message: &str) -> Result<()>;
    fn push(&self) -> Result<()>;
    fn pull(&self) -> Result<()>;
}

/// `git` command-line backend rooted at a work directory
#[derive(Debug, Clone)]
pub struct GitCli {
    repo: PathBuf,
}

impl GitCli {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }

    fn git(&self, args: &[&str]) -> Result<()> {
        tracing::debug!(repo = %self.repo.display(), ?args, "git");
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo)
            .args(args)
            .output()
            .context("failed to run git")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("git {} failed: {}", args.join(" "), stderr.trim());
        }
        Ok(())
    }
}

impl VersionControl for GitCli {
    fn add_all(&self) -> Result<()> {
        self.git(&["add", "--all"])
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.git(&["commit", "-m", message])
    }

    fn push(&self) -> Result<()> {
        self.git(&["push"])
    }

    fn pull(&self) -> Result<()> {
        self.git(&["pull"])
    }
}
