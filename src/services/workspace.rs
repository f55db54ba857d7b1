//! Lab work directory layout and student metadata

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::LabConfig;

/// Contents of the student metadata file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Remote repository URL
    #[serde(default)]
    pub git: String,
    /// Editor launched for the recorded session (e.g. "vim")
    #[serde(default = "default_editor")]
    pub editor: String,
    /// Lab directory names, in menu order
    #[serde(default)]
    pub lab_dir: Vec<String>,
}

fn default_editor() -> String {
    "vi".to_string()
}

/// Files belonging to one lab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabPaths {
    pub name: String,
    /// `<work>/<lab>/<lab>.sh`
    pub script: PathBuf,
    /// `<work>/<requirement_dir>/<lab>.txt`
    pub requirement: PathBuf,
    /// `<work>/<lab>/<lab>.cast`
    pub recording: PathBuf,
}

/// A student's work directory
#[derive(Debug, Clone)]
pub struct LabWorkspace {
    root: PathBuf,
    requirement_dir: String,
    pub student: StudentInfo,
}

impl LabWorkspace {
    /// Open a work directory and read its student metadata
    pub fn open(root: impl AsRef<Path>, config: &LabConfig) -> Result<Self> {
        let root = root.as_ref();
        if !root.exists() {
            bail!("{} does not exist", root.display());
        }
        if !root.is_dir() {
            bail!("{} is not a directory", root.display());
        }

        let student_path = root.join(&config.student_file);
        let contents = std::fs::read_to_string(&student_path)
            .with_context(|| format!("reading {}", student_path.display()))?;
        let student: StudentInfo = serde_json::from_str(&contents)
            .with_context(|| format!("parsing {}", student_path.display()))?;
        tracing::debug!(
            root = %root.display(),
            labs = student.lab_dir.len(),
            "workspace: opened"
        );

        Ok(Self {
            root: root.to_path_buf(),
            requirement_dir: config.requirement_dir.clone(),
            student,
        })
    }

    /// Build a workspace from already-known metadata
    pub fn from_parts(root: impl Into<PathBuf>, config: &LabConfig, student: StudentInfo) -> Self {
        Self {
            root: root.into(),
            requirement_dir: config.requirement_dir.clone(),
            student,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn labs(&self) -> &[String] {
        &self.student.lab_dir
    }

    /// Paths for the named lab
    pub fn lab(&self, name: &str) -> LabPaths {
        let lab_dir = self.root.join(name);
        LabPaths {
            name: name.to_string(),
            script: lab_dir.join(format!("{name}.sh")),
            requirement: self
                .root
                .join(&self.requirement_dir)
                .join(format!("{name}.txt")),
            recording: lab_dir.join(format!("{name}.cast")),
        }
    }

    /// Lab that follows `current` in the list, wrapping around
    pub fn next_lab(&self, current: &str) -> Option<&str> {
        let labs = self.labs();
        if labs.is_empty() {
            return None;
        }
        let next = labs
            .iter()
            .position(|lab| lab == current)
            .map_or(0, |i| (i + 1) % labs.len());
        Some(labs[next].as_str())
    }
}
