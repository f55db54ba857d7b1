//! External collaborators
//!
//! Everything here wraps a command-line tool or on-disk metadata behind a
//! small trait so the application loop can be driven with fakes in tests.
//! None of it touches text layout.

pub mod lint;
pub mod recorder;
pub mod vcs;
pub mod workspace;

pub use lint::{LintTool, ShellcheckLint};
pub use recorder::{AsciinemaRecorder, SessionRecorder};
pub use vcs::{GitCli, VersionControl};
pub use workspace::{LabPaths, LabWorkspace, StudentInfo};
