//! Lab work directory helper - builds a throwaway student work directory

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary student work directory with `student.json`
pub struct LabDir {
    _temp_dir: TempDir,
    pub path: PathBuf,
}

impl LabDir {
    /// Create a work directory listing `labs` in `student.json`
    pub fn new(labs: &[&str]) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().to_path_buf();

        let student = serde_json::json!({
            "name": "Test Student",
            "email": "student@example.com",
            "git": "https://example.com/student/labs.git",
            "editor": "vim",
            "lab_dir": labs,
        });
        fs::write(
            path.join("student.json"),
            serde_json::to_string_pretty(&student).expect("Failed to serialize student.json"),
        )
        .expect("Failed to write student.json");

        LabDir {
            _temp_dir: temp_dir,
            path,
        }
    }

    /// Create a file with content, making parent directories as needed
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let file_path = self.path.join(relative_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    /// Write `<lab>/<lab>.sh`
    pub fn write_script(&self, lab: &str, content: &str) -> PathBuf {
        self.create_file(&format!("{lab}/{lab}.sh"), content)
    }

    /// Write `Require/<lab>.txt`
    pub fn write_requirement(&self, lab: &str, content: &str) -> PathBuf {
        self.create_file(&format!("Require/{lab}.txt"), content)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
