//! View layer
//!
//! Text views ([`file_viewer::FileViewer`], [`controls::TextAreaState`]) draw
//! through the [`surface::Surface`] capability and stay terminal-agnostic.
//! The `runtime` feature adds the ratatui adapter and the color theme.

pub mod controls;
pub mod file_viewer;
pub mod surface;

#[cfg(feature = "runtime")]
pub mod terminal_surface;
#[cfg(feature = "runtime")]
pub mod theme;
