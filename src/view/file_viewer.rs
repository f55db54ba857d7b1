//! Read-only, syntax-highlighted, soft-wrapped file viewer
//!
//! The viewer owns the logical lines of one file, their annotations and the
//! wrapped chunks derived from both. Any change of content or width rebuilds
//! annotations and chunks from scratch; nothing is patched incrementally.
//!
//! `top_line` indexes into the chunk sequence (display rows), not into the
//! logical lines, and always stays within `0..=max(0, chunks - height)`.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::primitives::line_wrapping::{wrap_lines, WrappedChunk};
use crate::primitives::shell_highlighter::{annotate_lines, TokenKind};
use crate::view::surface::Surface;

/// Error returned when a file cannot be loaded into a viewer
#[derive(Debug)]
pub struct LoadError {
    pub path: PathBuf,
    pub source: io::Error,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot read {}: {}", self.path.display(), self.source)
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Scroll request for a viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
    PageUp,
    PageDown,
}

/// State for a paged file viewer
#[derive(Debug, Clone)]
pub struct FileViewer {
    /// File currently shown, if any
    path: Option<PathBuf>,
    lines: Vec<String>,
    annotations: Vec<Vec<TokenKind>>,
    chunks: Vec<WrappedChunk>,
    /// Index of the first visible chunk
    top_line: usize,
    width: usize,
    height: usize,
}

impl FileViewer {
    /// Create an empty viewer with the given viewport size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            path: None,
            lines: Vec::new(),
            annotations: Vec::new(),
            chunks: Vec::new(),
            top_line: 0,
            width,
            height,
        }
    }

    /// Create a viewer and load `path` into it
    pub fn open(path: impl AsRef<Path>, width: usize, height: usize) -> Result<Self, LoadError> {
        let mut viewer = Self::new(width, height);
        viewer.load(path)?;
        Ok(viewer)
    }

    /// Switch to another file. Scroll position resets to the top.
    ///
    /// On failure the previously shown content is kept as is.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();
        let lines = read_lines(path)?;
        tracing::debug!(path = %path.display(), lines = lines.len(), "viewer: switched file");
        self.path = Some(path.to_path_buf());
        self.top_line = 0;
        self.set_lines(lines);
        Ok(())
    }

    /// Re-read the current file, keeping the scroll position when possible.
    ///
    /// A viewer that has never loaded a file has nothing to reload and
    /// succeeds trivially.
    pub fn reload(&mut self) -> Result<(), LoadError> {
        let Some(path) = self.path.clone() else {
            return Ok(());
        };
        let lines = read_lines(&path)?;
        tracing::debug!(path = %path.display(), lines = lines.len(), "viewer: reloaded");
        self.set_lines(lines);
        Ok(())
    }

    /// Replace the content with in-memory lines (keeps the current path)
    pub fn set_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
        self.annotations = annotate_lines(&self.lines);
        self.rewrap();
    }

    /// Change the viewport size; chunks are rebuilt for the new width
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }
        tracing::debug!(width, height, "viewer: resize");
        let rewrap = width != self.width;
        self.width = width;
        self.height = height;
        if rewrap {
            self.rewrap();
        } else {
            self.clamp_top_line();
        }
    }

    fn rewrap(&mut self) {
        self.chunks = wrap_lines(&self.lines, &self.annotations, self.width);
        self.clamp_top_line();
    }

    fn clamp_top_line(&mut self) {
        self.top_line = self.top_line.min(self.max_top_line());
    }

    /// Scroll by one row or one page. Requests past either end are no-ops.
    pub fn scroll(&mut self, direction: ScrollDirection) {
        let max = self.max_top_line();
        self.top_line = match direction {
            ScrollDirection::Up => self.top_line.saturating_sub(1),
            ScrollDirection::Down => (self.top_line + 1).min(max),
            ScrollDirection::PageUp => self.top_line.saturating_sub(self.height),
            ScrollDirection::PageDown => self.top_line.saturating_add(self.height).min(max),
        };
        tracing::trace!(?direction, top_line = self.top_line, "viewer: scroll");
    }

    /// Largest valid `top_line`
    pub fn max_top_line(&self) -> usize {
        self.chunks.len().saturating_sub(self.height)
    }

    pub fn top_line(&self) -> usize {
        self.top_line
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunks(&self) -> &[WrappedChunk] {
        &self.chunks
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn annotations(&self) -> &[Vec<TokenKind>] {
        &self.annotations
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Chunks currently inside the viewport
    pub fn visible_chunks(&self) -> &[WrappedChunk] {
        let start = self.top_line.min(self.chunks.len());
        let end = start.saturating_add(self.height).min(self.chunks.len());
        &self.chunks[start..end]
    }

    /// `"<top_line + 1>/<total chunks>"`, or `None` when there is nothing to show
    pub fn position_indicator(&self) -> Option<String> {
        if self.chunks.is_empty() {
            None
        } else {
            Some(format!("{}/{}", self.top_line + 1, self.chunks.len()))
        }
    }

    /// Draw the viewport onto `surface`
    pub fn render(&self, surface: &mut impl Surface) {
        if self.width == 0 || self.height == 0 {
            return;
        }

        let visible = self.visible_chunks();
        for (row, chunk) in visible.iter().enumerate() {
            draw_chunk(surface, row, chunk);
            let used = chunk.char_len();
            if used < self.width {
                surface.clear_region(row, used, self.width - used, 1);
            }
        }

        if visible.len() < self.height {
            surface.clear_region(visible.len(), 0, self.width, self.height - visible.len());
        }

        if let Some(indicator) = self.position_indicator() {
            let len = indicator.chars().count();
            let col = self.width.saturating_sub(len + 1);
            surface.draw_styled_run(self.height - 1, col, &indicator, TokenKind::Plain);
        }
    }
}

/// Draw a chunk as runs of equally tagged characters
fn draw_chunk(surface: &mut impl Surface, row: usize, chunk: &WrappedChunk) {
    let mut run = String::new();
    let mut run_tag = TokenKind::Plain;
    let mut run_start = 0;

    for (col, (ch, tag)) in chunk.cells().enumerate() {
        if tag != run_tag && !run.is_empty() {
            surface.draw_styled_run(row, run_start, &run, run_tag);
            run.clear();
        }
        if run.is_empty() {
            run_start = col;
            run_tag = tag;
        }
        run.push(ch);
    }

    if !run.is_empty() {
        surface.draw_styled_run(row, run_start, &run, run_tag);
    }
}

/// Read a file as lines. Invalid UTF-8 is replaced rather than rejected;
/// only I/O failures are errors.
fn read_lines(path: &Path) -> Result<Vec<String>, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::surface::CellGrid;

    fn viewer_with(lines: &[&str], width: usize, height: usize) -> FileViewer {
        let mut viewer = FileViewer::new(width, height);
        viewer.set_lines(lines.iter().map(|s| s.to_string()).collect());
        viewer
    }

    #[test]
    fn test_five_line_file_with_long_line() {
        let long = "a".repeat(100);
        let viewer = viewer_with(&["one", "two", long.as_str(), "four", "five"], 40, 10);
        assert_eq!(viewer.chunk_count(), 7);
        let lens: Vec<usize> = viewer
            .chunks()
            .iter()
            .filter(|c| c.line_index == 2)
            .map(WrappedChunk::char_len)
            .collect();
        assert_eq!(lens, vec![40, 40, 20]);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let lines: Vec<String> = (0..10).map(|i| format!("line {i}")).collect();
        let mut viewer = FileViewer::new(20, 4);
        viewer.set_lines(lines);

        viewer.scroll(ScrollDirection::Up);
        assert_eq!(viewer.top_line(), 0);

        viewer.scroll(ScrollDirection::PageDown);
        assert_eq!(viewer.top_line(), 4);
        viewer.scroll(ScrollDirection::PageDown);
        assert_eq!(viewer.top_line(), 6);
        viewer.scroll(ScrollDirection::Down);
        assert_eq!(viewer.top_line(), 6);

        viewer.scroll(ScrollDirection::Up);
        assert_eq!(viewer.top_line(), 5);
        viewer.scroll(ScrollDirection::PageUp);
        assert_eq!(viewer.top_line(), 1);
        viewer.scroll(ScrollDirection::PageUp);
        assert_eq!(viewer.top_line(), 0);
    }

    #[test]
    fn test_short_file_never_scrolls() {
        let mut viewer = viewer_with(&["a", "b"], 10, 5);
        viewer.scroll(ScrollDirection::Down);
        viewer.scroll(ScrollDirection::PageDown);
        assert_eq!(viewer.top_line(), 0);
        assert_eq!(viewer.max_top_line(), 0);
    }

    #[test]
    fn test_resize_rewraps_and_clamps() {
        let long = "b".repeat(30);
        let mut viewer = viewer_with(&[long.as_str()], 10, 1);
        assert_eq!(viewer.chunk_count(), 3);
        viewer.scroll(ScrollDirection::PageDown);
        viewer.scroll(ScrollDirection::PageDown);
        assert_eq!(viewer.top_line(), 2);

        viewer.resize(15, 1);
        assert_eq!(viewer.chunk_count(), 2);
        assert_eq!(viewer.top_line(), 1);
    }

    #[test]
    fn test_render_pads_rows_and_draws_indicator() {
        let viewer = viewer_with(&["if x", "echo hi"], 10, 4);
        let mut grid = CellGrid::new(10, 4);
        // Stale content must be overwritten
        grid.draw_styled_run(0, 0, "##########", TokenKind::Comment);
        grid.draw_styled_run(2, 0, "##########", TokenKind::Comment);
        viewer.render(&mut grid);

        insta::assert_snapshot!(grid.to_framed_string(), @r"
        |if x      |
        |echo hi   |
        |          |
        |      1/2 |
        ");
        assert_eq!(grid.cell(0, 0).map(|c| c.tag), Some(TokenKind::Keyword));
        assert_eq!(grid.cell(0, 3).map(|c| c.tag), Some(TokenKind::Plain));
        assert_eq!(grid.cell(0, 5).map(|c| c.tag), Some(TokenKind::Plain));
    }

    #[test]
    fn test_render_scrolled_window() {
        let mut viewer = viewer_with(&["abcdef", "g"], 3, 2);
        viewer.scroll(ScrollDirection::Down);
        let mut grid = CellGrid::new(3, 2);
        viewer.render(&mut grid);
        assert_eq!(grid.row_text(0), "def");
        // Indicator "2/3" is wider than the margin allows and starts at column 0
        assert_eq!(grid.row_text(1), "2/3");
    }

    #[test]
    fn test_render_empty_viewer_clears_everything() {
        let viewer = FileViewer::new(4, 2);
        let mut grid = CellGrid::new(4, 2);
        grid.draw_styled_run(1, 0, "xxxx", TokenKind::Plain);
        viewer.render(&mut grid);
        assert_eq!(grid.to_framed_string(), "|    |\n|    |");
        assert_eq!(viewer.position_indicator(), None);
    }

    #[test]
    fn test_failed_load_keeps_previous_state() {
        let mut viewer = viewer_with(&["keep me"], 10, 3);
        let err = viewer
            .load("/definitely/not/here/lab1.sh")
            .expect_err("load should fail");
        assert!(err.to_string().contains("lab1.sh"));
        assert_eq!(viewer.lines(), &["keep me".to_string()]);
        assert_eq!(viewer.chunk_count(), 1);
    }

    #[test]
    fn test_reload_without_path_is_a_no_op() {
        let mut viewer = viewer_with(&["x"], 10, 3);
        assert!(viewer.reload().is_ok());
        assert_eq!(viewer.lines(), &["x".to_string()]);
    }
}
